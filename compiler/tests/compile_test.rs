#![cfg(test)]

use port_schema_compiler::{
    ast::{Constructor, Declaration, Exposing, Module, ModuleKind, TypeAnnotation},
    compile_json, compile_module, CompileOptions, DeclError, Error, OptionsError, SchemaError,
};

fn unit_alias(name: &str) -> Declaration {
    Declaration::TypeAlias {
        name:       name.into(),
        generics:   vec![],
        annotation: TypeAnnotation::Unit,
    }
}

fn custom_type(name: &str, constructors: Vec<(&str, Vec<TypeAnnotation>)>) -> Declaration {
    Declaration::CustomType {
        name:         name.into(),
        generics:     vec![],
        constructors: constructors
            .into_iter()
            .map(|(name, arguments)| Constructor { name: name.into(), arguments })
            .collect(),
    }
}

fn schema_module(mut declarations: Vec<Declaration>) -> Module {
    declarations.push(unit_alias("OutboundMessage"));
    declarations.push(unit_alias("InboundMessage"));
    Module::new("Schema", declarations)
}

fn point() -> Declaration {
    Declaration::TypeAlias {
        name:       "Point".into(),
        generics:   vec![],
        annotation: TypeAnnotation::record([
            ("x", TypeAnnotation::named("Int")),
            ("y", TypeAnnotation::named("Int")),
        ]),
    }
}

fn shape() -> Declaration {
    custom_type(
        "Shape",
        vec![
            ("Circle", vec![TypeAnnotation::named("Float")]),
            ("Square", vec![TypeAnnotation::named("Float"), TypeAnnotation::named("Float")]),
        ],
    )
}

#[test]
fn test_record_alias_scenario() {
    let output = compile_module(&schema_module(vec![point()]), &CompileOptions::default())
        .expect("compile_module failed");

    assert!(output.elm.starts_with("port module Port exposing (..)\n"));
    assert!(output.elm.contains("type alias Point =\n    { x : Int, y : Int }"));
    assert!(output.elm.contains("encodePoint : Point -> Json.Encode.Value\n"));
    assert!(output.elm.contains("decodePoint : Json.Decode.Decoder Point\n"));
    assert!(output.elm.contains("encodeOutboundMessage : OutboundMessage -> Json.Encode.Value\n"));
    assert!(output.elm.contains("decodeInboundMessage : Json.Decode.Decoder InboundMessage\n"));

    assert!(output
        .typescript
        .contains("export type Point = {\n    x: number;\n    y: number;\n};"));
    assert!(output
        .typescript
        .contains("export type OutboundMessage = { variant: \"()\" };"));
    assert!(output.typescript.contains("namespace Main {"));
}

#[test]
fn test_custom_type_scenario() {
    let output = compile_module(&schema_module(vec![shape()]), &CompileOptions::default())
        .expect("compile_module failed");

    assert!(output.elm.contains("type Shape\n    = Circle Float\n    | Square Float Float"));
    assert!(output.elm.contains("encodeVariant \"Circle\" [ Json.Encode.float arg0 ]"));
    assert!(output.elm.contains("Square arg1 arg2 ->"));
    assert!(output.typescript.contains(
        "export type Shape =\n    | { variant: \"Circle\"; _0: number }\n    | { variant: \"Square\"; _0: number; _1: number };"
    ));
}

#[test]
fn test_outputs_are_fully_assembled() {
    let output = compile_module(&schema_module(vec![point(), shape()]), &CompileOptions::default())
        .expect("compile_module failed");

    for text in [&output.elm, &output.typescript] {
        assert!(!text.contains("{{"), "unfilled placeholder");
        for line in text.lines() {
            assert_eq!(line, line.trim_end(), "trailing whitespace");
        }
    }
    assert!(output.elm.contains("Json.Encode.object\n        (( \"variant\", Json.Encode.string name )"));
    assert!(output.elm.contains("\"_\" ++ String.fromInt index"));
    assert!(output.elm.contains("(Json.Decode.index 2 decodeC)"));
}

#[test]
fn test_options_shape_the_output() {
    let options = CompileOptions {
        module_name: "Interop.Port".into(),
        main_module: "App.Main".into(),
        width:       120,
    };
    let output = compile_module(&schema_module(vec![point()]), &options).expect("compile_module failed");
    assert!(output.elm.starts_with("port module Interop.Port exposing (..)"));
    assert!(output.typescript.contains("namespace App.Main {"));
}

#[test]
fn test_options_are_validated_first() {
    let options = CompileOptions {
        module_name: "port".into(),
        ..CompileOptions::default()
    };
    let mut module = schema_module(vec![]);
    module.kind = ModuleKind::Port;
    match compile_module(&module, &options) {
        Err(Error::Options(OptionsError::InvalidModuleName(name))) => assert_eq!(name, "port"),
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_preconditions_fail_fast() {
    let mut module = schema_module(vec![Declaration::Value { name: "main".into() }]);
    module.kind = ModuleKind::Port;
    module.exposing = Exposing::Explicit { names: vec!["Point".into()] };
    match compile_module(&module, &CompileOptions::default()) {
        Err(Error::Schema(SchemaError::IsPortModule)) => {}
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_declaration_errors_accumulate() {
    let module = schema_module(vec![
        Declaration::Value { name: "main".into() },
        point(),
        Declaration::TypeAlias {
            name:       "Triple".into(),
            generics:   vec![],
            annotation: TypeAnnotation::Tupled {
                items: vec![TypeAnnotation::Unit; 4],
            },
        },
    ]);
    match compile_module(&module, &CompileOptions::default()) {
        Err(Error::Schema(SchemaError::ContainsBadDeclarations(errors))) => assert_eq!(
            errors,
            vec![
                DeclError::IsValue("main".into()),
                DeclError::InvalidTupleArity {
                    declaration: "Triple".into(),
                    arity:       4,
                },
            ]
        ),
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_prelude_names_are_rejected() {
    let module = schema_module(vec![
        Declaration::TypeAlias {
            name:       "Variant".into(),
            generics:   vec![],
            annotation: TypeAnnotation::named("Int"),
        },
        custom_type("Maybe", vec![("Some", vec![])]),
    ]);
    match compile_module(&module, &CompileOptions::default()) {
        Err(Error::Schema(SchemaError::ContainsBadDeclarations(errors))) => assert_eq!(
            errors,
            vec![
                DeclError::ReservedName("Variant".into()),
                DeclError::ReservedName("Maybe".into()),
            ]
        ),
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_missing_message_types() {
    let module = Module::new("Schema", vec![point(), unit_alias("OutboundMessage")]);
    match compile_module(&module, &CompileOptions::default()) {
        Err(Error::Schema(SchemaError::MissingInboundMessageDeclaration)) => {}
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_recursive_type_compiles() {
    let tree = custom_type(
        "Tree",
        vec![
            ("Leaf", vec![]),
            ("Node", vec![TypeAnnotation::named("Tree"), TypeAnnotation::named("Tree")]),
        ],
    );
    let output = compile_module(&schema_module(vec![tree]), &CompileOptions::default())
        .expect("compile_module failed");
    assert!(output.elm.contains("Json.Decode.lazy (\\_ -> decodeTree)"));
    assert!(output.elm.contains("decodeVariant \"Leaf\" (Json.Decode.succeed Leaf)"));
    assert!(output
        .typescript
        .contains("    | { variant: \"Leaf\" }\n    | { variant: \"Node\"; _0: Tree; _1: Tree };"));
}

#[test]
fn test_compile_json() {
    let json = r#"{
        "name": "Schema",
        "kind": "normal",
        "exposing": { "kind": "all" },
        "declarations": [
            { "kind": "typeAlias", "name": "OutboundMessage", "annotation": { "kind": "typed", "name": "String" } },
            { "kind": "typeAlias", "name": "InboundMessage", "annotation": { "kind": "unit" } }
        ]
    }"#;
    let output = compile_json(json, &CompileOptions::default()).expect("compile_json failed");
    assert!(output.elm.contains("encodeOutboundMessage =\n    Json.Encode.string"));
    assert!(output.typescript.contains("export type OutboundMessage = string;"));

    match compile_json("{ not json", &CompileOptions::default()) {
        Err(Error::Parse(_)) => {}
        other => panic!("unexpected result {:?}", other),
    }
}
