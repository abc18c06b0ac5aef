use crate::error::OptionsError;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

lazy_static! {
    static ref MODULE_NAME: Regex =
        Regex::new(r"^[A-Z][A-Za-z0-9_]*(\.[A-Z][A-Za-z0-9_]*)*$").unwrap();
}

/// Narrowest page width the codec layout is allowed to target.
pub const MIN_WIDTH: usize = 20;

/// Knobs of a single compilation. Every field has a default, so an empty
/// JSON object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct CompileOptions {
    /// Name of the generated Elm port module.
    pub module_name: String,
    /// Elm module whose `init` the TypeScript declarations describe.
    pub main_module: String,
    /// Page width of the generated Elm codecs.
    pub width:       usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            module_name: "Port".to_owned(),
            main_module: "Main".to_owned(),
            width:       80,
        }
    }
}

impl CompileOptions {
    pub fn validate(&self) -> Result<(), OptionsError> {
        for name in [&self.module_name, &self.main_module] {
            if !MODULE_NAME.is_match(name) {
                return Err(OptionsError::InvalidModuleName(name.clone()));
            }
        }
        if self.width < MIN_WIDTH {
            return Err(OptionsError::WidthTooSmall(self.width));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn defaults() {
        let options: CompileOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, CompileOptions::default());
        assert_eq!(options.module_name, "Port");
        assert_eq!(options.width, 80);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let options: CompileOptions =
            serde_json::from_str(r#"{"moduleName": "Interop.Port", "width": 100}"#).unwrap();
        assert_eq!(options.module_name, "Interop.Port");
        assert_eq!(options.main_module, "Main");
        assert_eq!(options.width, 100);
        assert!(options.validate().is_ok());
    }

    #[test_case("port" ; "lowercase")]
    #[test_case("Port." ; "trailing dot")]
    #[test_case("My-Port" ; "dash")]
    #[test_case("" ; "empty")]
    fn invalid_module_names(name: &str) {
        let options = CompileOptions {
            module_name: name.to_owned(),
            ..CompileOptions::default()
        };
        assert_eq!(
            options.validate(),
            Err(OptionsError::InvalidModuleName(name.to_owned()))
        );
    }

    #[test]
    fn width_floor() {
        let options = CompileOptions {
            width: MIN_WIDTH - 1,
            ..CompileOptions::default()
        };
        assert_eq!(options.validate(), Err(OptionsError::WidthTooSmall(MIN_WIDTH - 1)));
    }
}
