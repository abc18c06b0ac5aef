// example/src/main.rs

use port_schema::ast::{Constructor, Declaration, Module, TypeAnnotation};
use port_schema::*;

fn custom_type(name: &str, constructors: Vec<(&str, Vec<TypeAnnotation>)>) -> Declaration {
    Declaration::CustomType {
        name:         name.to_owned(),
        generics:     Vec::new(),
        constructors: constructors
            .into_iter()
            .map(|(name, arguments)| Constructor { name: name.to_owned(), arguments })
            .collect(),
    }
}

/// The module an Elm parser would produce for:
///
/// ```elm
/// module Schema exposing (..)
///
/// type alias Point = { x : Int, y : Int }
///
/// type Shape = Circle Float | Square Float Float
///
/// type OutboundMessage = Drew Shape Point
///
/// type InboundMessage = Clear | Highlight (Maybe Point)
/// ```
fn schema_module() -> Module {
    let point = Declaration::TypeAlias {
        name:       "Point".to_owned(),
        generics:   Vec::new(),
        annotation: TypeAnnotation::record([
            ("x", TypeAnnotation::named("Int")),
            ("y", TypeAnnotation::named("Int")),
        ]),
    };
    let shape = custom_type(
        "Shape",
        vec![
            ("Circle", vec![TypeAnnotation::named("Float")]),
            ("Square", vec![TypeAnnotation::named("Float"), TypeAnnotation::named("Float")]),
        ],
    );
    let outbound = custom_type(
        "OutboundMessage",
        vec![("Drew", vec![TypeAnnotation::named("Shape"), TypeAnnotation::named("Point")])],
    );
    let inbound = custom_type(
        "InboundMessage",
        vec![
            ("Clear", vec![]),
            ("Highlight", vec![TypeAnnotation::applied("Maybe", vec![TypeAnnotation::named("Point")])]),
        ],
    );
    Module::new("Schema", vec![point, shape, outbound, inbound])
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let module = schema_module();

    let output = compile_module(&module, &CompileOptions::default())?;
    println!("-- src/Port.elm ({} bytes)\n\n{}\n", output.elm.len(), output.elm);
    println!("// src/Main.d.ts ({} bytes)\n\n{}\n", output.typescript.len(), output.typescript);

    // What the generated `send` puts on the `fromElm` port.
    let schema = extract(&module)?;
    let drew = Value::variant(
        "Drew",
        vec![
            Value::variant("Square", vec![Value::Float(2.0), Value::Float(3.5)]),
            Value::record([("x", Value::Int(1)), ("y", Value::Int(2))]),
        ],
    );
    let json = wire::encode_declaration(&schema, "OutboundMessage", &drew)?;
    println!("OutboundMessage = {}", serde_json::to_string_pretty(&json)?);

    // And what JavaScript has to send back through `toElm`.
    let text = r#"{"variant": "Highlight", "_0": {"variant": "Just", "_0": {"x": 4, "y": 5}}}"#;
    let highlight = wire::decode_declaration(&schema, "InboundMessage", &serde_json::from_str(text)?)?;
    println!("InboundMessage = {:?}", highlight);

    // A tag the Elm decoder would reject too.
    let bad = serde_json::json!({ "variant": "Reset" });
    if let Err(error) = wire::decode_declaration(&schema, "InboundMessage", &bad) {
        println!("rejected: {}", error);
    }

    Ok(())
}
