use crate::error::Error;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{\{([a-z_]+)\}\}").unwrap();
}

/// Skeleton of the generated Elm port module.
pub const ELM_TEMPLATE: &str = include_str!("../templates/Port.elm");

/// Skeleton of the generated TypeScript declaration file.
pub const TYPESCRIPT_TEMPLATE: &str = include_str!("../templates/Main.d.ts");

/// Substitutes every `{{name}}` in `template`. A placeholder without a value
/// is an error; substituted text is never scanned again.
pub fn fill(template: &str, values: &[(&str, &str)]) -> Result<String, Error> {
    let lookup = |name: &str| {
        values
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    };

    if let Some(missing) = PLACEHOLDER
        .captures_iter(template)
        .map(|captures| captures[1].to_owned())
        .find(|name| lookup(name).is_none())
    {
        return Err(Error::Template(format!("no value for placeholder {{{{{}}}}}", missing)));
    }

    let filled = PLACEHOLDER.replace_all(template, |captures: &Captures| {
        lookup(&captures[1]).unwrap_or_default().to_owned()
    });
    Ok(filled.into_owned())
}
