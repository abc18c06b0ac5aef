//! TypeScript backend: one exported type per schema declaration, describing
//! exactly the JSON the Elm codecs read and write.

use crate::utils::{indent, quote};

use port_schema_model::wire::{arg_key, ERR, JUST, NOTHING, OK, UNIT_TAG, VARIANT_TAG};
use port_schema_model::{Declaration, Field, Schema, SchemaType, Variant};
use tracing::debug;

const INDENT: usize = 4;

/// Declarations joined by blank lines, in schema order.
pub fn compile_schema_to_typescript(schema: &Schema) -> String {
    debug!(declarations = schema.declarations.len(), "generating TypeScript declarations");

    schema
        .declarations
        .iter()
        .map(declaration)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// The generic `Maybe` and `Result` unions the declarations refer to.
pub fn prelude() -> String {
    let maybe = union(
        "Maybe<T>",
        &[
            variant_member(JUST, &["T".to_owned()]),
            variant_member(NOTHING, &[]),
        ],
    );
    let result = union(
        "Result<E, T>",
        &[
            variant_member(OK, &["T".to_owned()]),
            variant_member(ERR, &["E".to_owned()]),
        ],
    );
    format!("{}\n\n{}", maybe, result)
}

pub fn declaration(declaration: &Declaration) -> String {
    match declaration {
        Declaration::TypeAlias { name, definition } => {
            format!("export type {} = {};", name, ts_type(definition))
        }
        Declaration::CustomType { name, variants } => {
            let members = variants.iter().map(variant_type).collect::<Vec<_>>();
            union(name, &members)
        }
    }
}

pub fn ts_type(type_: &SchemaType) -> String {
    match type_ {
        SchemaType::Unit => variant_member(UNIT_TAG, &[]),
        SchemaType::Bool => "boolean".to_owned(),
        SchemaType::Int | SchemaType::Float => "number".to_owned(),
        SchemaType::Char | SchemaType::String => "string".to_owned(),
        SchemaType::List(element) => format!("Array<{}>", ts_type(element)),
        SchemaType::Tuple(a, b) => format!("[{}, {}]", ts_type(a), ts_type(b)),
        SchemaType::Tuple3(a, b, c) => {
            format!("[{}, {}, {}]", ts_type(a), ts_type(b), ts_type(c))
        }
        SchemaType::Record(fields) => record(fields),
        SchemaType::TypeRef(name) => name.clone(),
        SchemaType::Maybe(inner) => format!("Maybe<{}>", ts_type(inner)),
        SchemaType::Result(error, ok) => format!("Result<{}, {}>", ts_type(error), ts_type(ok)),
    }
}

fn record(fields: &[Field]) -> String {
    if fields.is_empty() {
        return "{}".to_owned();
    }
    let members = fields
        .iter()
        .map(|field| {
            format!(
                "{}{}: {};",
                " ".repeat(INDENT),
                field.name,
                indent(INDENT, &ts_type(&field.type_))
            )
        })
        .collect::<Vec<_>>();
    format!("{{\n{}\n}}", members.join("\n"))
}

fn variant_type(variant: &Variant) -> String {
    let args = variant.arguments.iter().map(ts_type).collect::<Vec<_>>();
    variant_member(&variant.name, &args)
}

/// `{ variant: "Name"; _0: A; _1: B }`
fn variant_member(name: &str, args: &[String]) -> String {
    let mut members = vec![format!("{}: {}", VARIANT_TAG, quote(name))];
    members.extend(
        args.iter()
            .enumerate()
            .map(|(i, arg)| format!("{}: {}", arg_key(i), arg)),
    );
    format!("{{ {} }}", members.join("; "))
}

fn union(name: &str, members: &[String]) -> String {
    if members.is_empty() {
        return format!("export type {} = never;", name);
    }
    let members = members
        .iter()
        .map(|member| format!("{}| {}", " ".repeat(INDENT), indent(INDENT, member)))
        .collect::<Vec<_>>();
    format!("export type {} =\n{};", name, members.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use port_schema_model::{wire, Value};

    fn shape() -> Declaration {
        Declaration::CustomType {
            name:     "Shape".into(),
            variants: vec![
                Variant::new("Circle", vec![SchemaType::Float]),
                Variant::new("Square", vec![SchemaType::Float, SchemaType::Float]),
            ],
        }
    }

    fn point() -> Declaration {
        Declaration::TypeAlias {
            name:       "Point".into(),
            definition: SchemaType::record(vec![("x", SchemaType::Int), ("y", SchemaType::Int)]),
        }
    }

    #[test]
    fn record_alias() {
        assert_eq!(
            declaration(&point()),
            "export type Point = {\n    x: number;\n    y: number;\n};"
        );
    }

    #[test]
    fn custom_type_is_a_discriminated_union() {
        assert_eq!(
            declaration(&shape()),
            "export type Shape =\n    | { variant: \"Circle\"; _0: number }\n    | { variant: \"Square\"; _0: number; _1: number };"
        );
    }

    #[test]
    fn nested_records_are_indented() {
        let nested = Declaration::CustomType {
            name:     "Event".into(),
            variants: vec![Variant::new(
                "Moved",
                vec![SchemaType::record(vec![(
                    "to",
                    SchemaType::record(vec![("x", SchemaType::Float)]),
                )])],
            )],
        };
        assert_eq!(
            declaration(&nested),
            "export type Event =\n    | { variant: \"Moved\"; _0: {\n        to: {\n            x: number;\n        };\n    } };"
        );
    }

    #[test]
    fn primitives_and_containers() {
        assert_eq!(ts_type(&SchemaType::Unit), "{ variant: \"()\" }");
        assert_eq!(ts_type(&SchemaType::Char), "string");
        assert_eq!(ts_type(&SchemaType::list(SchemaType::Bool)), "Array<boolean>");
        assert_eq!(
            ts_type(&SchemaType::tuple3(SchemaType::Int, SchemaType::String, SchemaType::Bool)),
            "[number, string, boolean]"
        );
        assert_eq!(
            ts_type(&SchemaType::result(SchemaType::String, SchemaType::maybe(SchemaType::type_ref("Tree")))),
            "Result<string, Maybe<Tree>>"
        );
        assert_eq!(ts_type(&SchemaType::Record(vec![])), "{}");
    }

    #[test]
    fn prelude_declares_maybe_and_result() {
        assert_eq!(
            prelude(),
            "export type Maybe<T> =\n    | { variant: \"Just\"; _0: T }\n    | { variant: \"Nothing\" };\n\nexport type Result<E, T> =\n    | { variant: \"Ok\"; _0: T }\n    | { variant: \"Err\"; _0: E };"
        );
    }

    #[test]
    fn union_members_match_the_wire_envelope() {
        let schema = Schema::new(vec![shape()]);
        let json = wire::encode_declaration(
            &schema,
            "Shape",
            &Value::variant("Square", vec![Value::Float(1.0), Value::Float(2.0)]),
        )
        .unwrap();
        let object = json.as_object().unwrap();

        let typescript = compile_schema_to_typescript(&schema);
        let member = typescript.lines().find(|line| line.contains("\"Square\"")).unwrap();
        for key in object.keys() {
            assert!(member.contains(&format!("{}: ", key)), "{} missing from {}", key, member);
        }
        assert_eq!(object.len(), 3);
    }

    #[test]
    fn record_members_match_the_wire_object() {
        let schema = Schema::new(vec![point()]);
        let json = wire::encode_declaration(
            &schema,
            "Point",
            &Value::record(vec![("x", Value::Int(1)), ("y", Value::Int(2))]),
        )
        .unwrap();
        let mut keys = json.as_object().unwrap().keys().cloned().collect::<Vec<_>>();
        keys.sort();

        let typescript = compile_schema_to_typescript(&schema);
        let mut members = typescript
            .lines()
            .filter_map(|line| line.trim().split_once(": "))
            .map(|(name, _)| name.to_owned())
            .collect::<Vec<_>>();
        members.sort();
        assert_eq!(members, keys);
    }
}
