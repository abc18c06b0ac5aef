//! port-schema
//!
//! One-stop API for turning an Elm type schema into port codecs.
//!
//! - `compile_module` / `compile_json` (re-exported from the compiler)
//! - The schema model, dynamic `Value`s and the reference wire codec
//! - JSON helpers for inspecting extracted schemas and port messages

pub use port_schema_compiler::{
    compile_json, compile_module, compile_schema, extract, CompileOptions, DeclError, Error,
    OptionsError, Output, SchemaError,
};
pub use port_schema_model::{wire, Declaration, Field, Schema, SchemaType, Value, Variant, WireError};

/// Extract the schema from a module AST given as JSON.
pub fn extract_json(text: &str) -> Result<Schema, Error> {
    let module: ast::Module = serde_json::from_str(text).map_err(|e| Error::Parse(e.to_string()))?;
    Ok(extract(&module)?)
}

/// Pretty-print an extracted schema as JSON.
pub fn schema_to_json(schema: &Schema) -> serde_json::Result<String> {
    serde_json::to_string_pretty(schema)
}

/// Encode a value of the declaration `name` to the JSON text its generated
/// Elm decoder accepts.
pub fn encode_message(schema: &Schema, name: &str, value: &Value) -> Result<String, WireError> {
    wire::encode_declaration(schema, name, value).map(|json| json.to_string())
}

pub mod ast {
    pub use port_schema_compiler::ast::*;
}

pub mod error {
    pub use port_schema_compiler::error::{DeclError, Error, OptionsError, SchemaError};
    pub use port_schema_model::WireError;
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODULE: &str = r#"{
        "name": "Schema",
        "kind": "normal",
        "exposing": { "kind": "all" },
        "declarations": [
            {
                "kind": "customType",
                "name": "OutboundMessage",
                "constructors": [
                    { "name": "Saved", "arguments": [ { "kind": "typed", "name": "Int" } ] },
                    { "name": "Closed" }
                ]
            },
            { "kind": "typeAlias", "name": "InboundMessage", "annotation": { "kind": "unit" } }
        ]
    }"#;

    #[test]
    fn extract_and_dump() {
        let schema = extract_json(MODULE).unwrap();
        assert_eq!(schema.declarations.len(), 2);
        let json = schema_to_json(&schema).unwrap();
        assert!(json.contains("\"OutboundMessage\""));
        assert!(json.contains("\"Saved\""));
    }

    #[test]
    fn encode_outbound_message() {
        let schema = extract_json(MODULE).unwrap();
        let saved = Value::variant("Saved", vec![Value::Int(7)]);
        assert_eq!(
            encode_message(&schema, "OutboundMessage", &saved).unwrap(),
            r#"{"_0":7,"variant":"Saved"}"#
        );
        assert_eq!(
            encode_message(&schema, "InboundMessage", &Value::Unit).unwrap(),
            r#"{"variant":"()"}"#
        );
    }

    #[test]
    fn parse_errors_are_opaque() {
        assert!(matches!(extract_json("[]"), Err(Error::Parse(_))));
    }
}
