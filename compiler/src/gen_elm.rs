//! Elm backend: re-declares the schema types inside the port module and
//! generates one encoder and one decoder per declaration.
//!
//! The generated code leans on a small set of helpers defined in the module
//! prelude (see [`prelude`]), so the shape of the wire format lives in one
//! place on the Elm side as well.

use crate::elm::print::render_decls;
use crate::elm::syntax::{Decl, Expr, Pattern, TypeExpr};

use port_schema_model::{Declaration, Field, Schema, SchemaType, Variant};
use std::collections::HashMap;
use tracing::debug;

/// Names of the helpers the generated codecs call. Every one of them is
/// defined in the Elm template.
pub mod prelude {
    pub const ENCODE_UNIT: &str = "encodeUnit";
    pub const DECODE_UNIT: &str = "decodeUnit";
    pub const ENCODE_CHAR: &str = "encodeChar";
    pub const DECODE_CHAR: &str = "decodeChar";
    pub const ENCODE_TUPLE2: &str = "encodeTuple2";
    pub const DECODE_TUPLE2: &str = "decodeTuple2";
    pub const ENCODE_TUPLE3: &str = "encodeTuple3";
    pub const DECODE_TUPLE3: &str = "decodeTuple3";
    pub const ENCODE_MAYBE: &str = "encodeMaybe";
    pub const DECODE_MAYBE: &str = "decodeMaybe";
    pub const ENCODE_RESULT: &str = "encodeResult";
    pub const DECODE_RESULT: &str = "decodeResult";
    pub const ENCODE_RECORD: &str = "encodeRecord";
    pub const DECODE_RECORD_FIELD: &str = "decodeRecordField";
    pub const ENCODE_VARIANT: &str = "encodeVariant";
    pub const DECODE_VARIANT: &str = "decodeVariant";
    pub const DECODE_VARIANT_ARG: &str = "decodeVariantArg";
    pub const DECODE_CUSTOM_TYPE: &str = "decodeCustomType";
    pub const DECODE_AND_MAP: &str = "decodeAndMap";

    pub const ALL: &[&str] = &[
        ENCODE_UNIT,
        DECODE_UNIT,
        ENCODE_CHAR,
        DECODE_CHAR,
        ENCODE_TUPLE2,
        DECODE_TUPLE2,
        ENCODE_TUPLE3,
        DECODE_TUPLE3,
        ENCODE_MAYBE,
        DECODE_MAYBE,
        ENCODE_RESULT,
        DECODE_RESULT,
        ENCODE_RECORD,
        DECODE_RECORD_FIELD,
        ENCODE_VARIANT,
        DECODE_VARIANT,
        DECODE_VARIANT_ARG,
        DECODE_CUSTOM_TYPE,
        DECODE_AND_MAP,
    ];
}

/// Json.Decode.mapN exists up to 8 arguments.
const MAX_MAP_ARITY: usize = 8;

/// The two generated sections of the Elm port module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElmOutput {
    pub type_declarations: String,
    pub codecs:            String,
}

pub fn encoder_name(declaration: &str) -> String {
    format!("encode{}", declaration)
}

pub fn decoder_name(declaration: &str) -> String {
    format!("decode{}", declaration)
}

/// Generates both sections, laid out for `width` columns. Declarations keep
/// the schema order; each one contributes its encoder, then its decoder.
pub fn compile_schema_to_elm(schema: &Schema, width: usize) -> ElmOutput {
    debug!(declarations = schema.declarations.len(), width, "generating Elm codecs");

    let types = schema
        .declarations
        .iter()
        .map(type_declaration)
        .collect::<Vec<_>>();
    let codecs = schema
        .declarations
        .iter()
        .flat_map(codec_declarations)
        .collect::<Vec<_>>();

    ElmOutput {
        type_declarations: render_decls(width, &types),
        codecs:            render_decls(width, &codecs),
    }
}

/// The Elm type for a schema type, as written in annotations.
pub fn elm_type(type_: &SchemaType) -> TypeExpr {
    match type_ {
        SchemaType::Unit => TypeExpr::Unit,
        SchemaType::Bool => TypeExpr::named("Bool"),
        SchemaType::Int => TypeExpr::named("Int"),
        SchemaType::Float => TypeExpr::named("Float"),
        SchemaType::Char => TypeExpr::named("Char"),
        SchemaType::String => TypeExpr::named("String"),
        SchemaType::List(element) => TypeExpr::applied("List", vec![elm_type(element)]),
        SchemaType::Tuple(a, b) => TypeExpr::Tuple(vec![elm_type(a), elm_type(b)]),
        SchemaType::Tuple3(a, b, c) => TypeExpr::Tuple(vec![elm_type(a), elm_type(b), elm_type(c)]),
        SchemaType::Record(fields) => TypeExpr::Record(
            fields
                .iter()
                .map(|field| (field.name.clone(), elm_type(&field.type_)))
                .collect(),
        ),
        SchemaType::TypeRef(name) => TypeExpr::named(name.clone()),
        SchemaType::Maybe(inner) => TypeExpr::applied("Maybe", vec![elm_type(inner)]),
        SchemaType::Result(error, ok) => {
            TypeExpr::applied("Result", vec![elm_type(error), elm_type(ok)])
        }
    }
}

pub fn type_declaration(declaration: &Declaration) -> Decl {
    match declaration {
        Declaration::TypeAlias { name, definition } => Decl::TypeAlias {
            name:  name.clone(),
            type_: elm_type(definition),
        },
        Declaration::CustomType { name, variants } => Decl::CustomType {
            name:         name.clone(),
            constructors: variants
                .iter()
                .map(|variant| {
                    (variant.name.clone(), variant.arguments.iter().map(elm_type).collect())
                })
                .collect(),
        },
    }
}

/// The encoder and decoder of one declaration, in that order.
pub fn codec_declarations(declaration: &Declaration) -> Vec<Decl> {
    let name = declaration.name();
    let mut names = Names::default();

    let (encoder_body, decoder_body) = match declaration {
        Declaration::TypeAlias { definition, .. } => {
            let decoder_body = match definition {
                SchemaType::Record(fields) => decode_record(&mut names, fields, Some(name)),
                _ => decoder(&mut names, definition),
            };
            (encoder(&mut names, definition), decoder_body)
        }
        Declaration::CustomType { variants, .. } => (
            encode_custom_type(&mut names, variants),
            decode_custom_type(&mut names, variants),
        ),
    };

    vec![
        Decl::Value {
            name:      encoder_name(name),
            signature: TypeExpr::function(TypeExpr::named(name), TypeExpr::named("Json.Encode.Value")),
            body:      encoder_body,
        },
        Decl::Value {
            name:      decoder_name(name),
            signature: TypeExpr::applied("Json.Decode.Decoder", vec![TypeExpr::named(name)]),
            body:      decoder_body,
        },
    ]
}

/// Hands out `value0`, `value1`, `arg0`, ... Elm rejects shadowed names, so
/// every binder inside one declaration gets its own.
#[derive(Default)]
struct Names {
    counters: HashMap<&'static str, usize>,
}

impl Names {
    fn fresh(&mut self, prefix: &'static str) -> String {
        let counter = self.counters.entry(prefix).or_insert(0);
        let name = format!("{}{}", prefix, counter);
        *counter += 1;
        name
    }
}

/// An expression of type `a -> Json.Encode.Value` for `type_`.
fn encoder(names: &mut Names, type_: &SchemaType) -> Expr {
    match type_ {
        SchemaType::Unit => Expr::var(prelude::ENCODE_UNIT),
        SchemaType::Bool => Expr::var("Json.Encode.bool"),
        SchemaType::Int => Expr::var("Json.Encode.int"),
        SchemaType::Float => Expr::var("Json.Encode.float"),
        SchemaType::Char => Expr::var(prelude::ENCODE_CHAR),
        SchemaType::String => Expr::var("Json.Encode.string"),
        SchemaType::List(element) => Expr::call("Json.Encode.list", vec![encoder(names, element)]),
        SchemaType::Tuple(a, b) => Expr::call(
            prelude::ENCODE_TUPLE2,
            vec![encoder(names, a), encoder(names, b)],
        ),
        SchemaType::Tuple3(a, b, c) => Expr::call(
            prelude::ENCODE_TUPLE3,
            vec![encoder(names, a), encoder(names, b), encoder(names, c)],
        ),
        SchemaType::Record(_) => {
            let value = names.fresh("value");
            let body = encode_value(names, type_, Expr::var(value.clone()));
            Expr::lambda(vec![Pattern::Var(value)], body)
        }
        SchemaType::TypeRef(name) => Expr::var(encoder_name(name)),
        SchemaType::Maybe(inner) => Expr::call(prelude::ENCODE_MAYBE, vec![encoder(names, inner)]),
        SchemaType::Result(error, ok) => Expr::call(
            prelude::ENCODE_RESULT,
            vec![encoder(names, error), encoder(names, ok)],
        ),
    }
}

/// Encodes `subject` directly. Records are spelled out field by field instead
/// of going through a lambda.
fn encode_value(names: &mut Names, type_: &SchemaType, subject: Expr) -> Expr {
    match type_ {
        SchemaType::Record(fields) => {
            let pairs = fields
                .iter()
                .map(|field| {
                    let value = encode_value(names, &field.type_, subject.clone().access(&field.name));
                    Expr::Tuple(vec![Expr::str(&field.name), value])
                })
                .collect();
            Expr::call(prelude::ENCODE_RECORD, vec![Expr::List(pairs)])
        }
        _ => encoder(names, type_).app(vec![subject]),
    }
}

fn encode_custom_type(names: &mut Names, variants: &[Variant]) -> Expr {
    let value = names.fresh("value");
    let branches = variants
        .iter()
        .map(|variant| {
            let args = variant
                .arguments
                .iter()
                .map(|_| names.fresh("arg"))
                .collect::<Vec<_>>();
            let encoded = variant
                .arguments
                .iter()
                .zip(&args)
                .map(|(type_, arg)| encode_value(names, type_, Expr::var(arg.clone())))
                .collect();
            let pattern = Pattern::Ctor(
                variant.name.clone(),
                args.into_iter().map(Pattern::Var).collect(),
            );
            let body = Expr::call(
                prelude::ENCODE_VARIANT,
                vec![Expr::str(&variant.name), Expr::List(encoded)],
            );
            (pattern, body)
        })
        .collect();

    Expr::lambda(
        vec![Pattern::Var(value.clone())],
        Expr::Case(Box::new(Expr::var(value)), branches),
    )
}

/// An expression of type `Json.Decode.Decoder a` for `type_`.
fn decoder(names: &mut Names, type_: &SchemaType) -> Expr {
    match type_ {
        SchemaType::Unit => Expr::var(prelude::DECODE_UNIT),
        SchemaType::Bool => Expr::var("Json.Decode.bool"),
        SchemaType::Int => Expr::var("Json.Decode.int"),
        SchemaType::Float => Expr::var("Json.Decode.float"),
        SchemaType::Char => Expr::var(prelude::DECODE_CHAR),
        SchemaType::String => Expr::var("Json.Decode.string"),
        SchemaType::List(element) => Expr::call("Json.Decode.list", vec![decoder(names, element)]),
        SchemaType::Tuple(a, b) => Expr::call(
            prelude::DECODE_TUPLE2,
            vec![decoder(names, a), decoder(names, b)],
        ),
        SchemaType::Tuple3(a, b, c) => Expr::call(
            prelude::DECODE_TUPLE3,
            vec![decoder(names, a), decoder(names, b), decoder(names, c)],
        ),
        SchemaType::Record(fields) => decode_record(names, fields, None),
        // Deferred so that recursive declarations do not define a value in
        // terms of itself.
        SchemaType::TypeRef(name) => Expr::call(
            "Json.Decode.lazy",
            vec![Expr::lambda(vec![Pattern::Wildcard], Expr::var(decoder_name(name)))],
        ),
        SchemaType::Maybe(inner) => Expr::call(prelude::DECODE_MAYBE, vec![decoder(names, inner)]),
        SchemaType::Result(error, ok) => Expr::call(
            prelude::DECODE_RESULT,
            vec![decoder(names, error), decoder(names, ok)],
        ),
    }
}

/// `Json.Decode.succeed Ctor |> decodeRecordField "x" ..`. A record type
/// alias brings its own constructor; anonymous records get a lambda.
fn decode_record(names: &mut Names, fields: &[Field], constructor: Option<&str>) -> Expr {
    let constructor = match constructor {
        _ if fields.is_empty() => Expr::Record(Vec::new()),
        Some(name) => Expr::var(name),
        None => {
            let params = fields.iter().map(|_| names.fresh("field")).collect::<Vec<_>>();
            let record = fields
                .iter()
                .zip(&params)
                .map(|(field, param)| (field.name.clone(), Expr::var(param.clone())))
                .collect();
            Expr::lambda(params.into_iter().map(Pattern::Var).collect(), Expr::Record(record))
        }
    };

    let stages = fields
        .iter()
        .map(|field| {
            Expr::call(
                prelude::DECODE_RECORD_FIELD,
                vec![Expr::str(&field.name), decoder(names, &field.type_)],
            )
        })
        .collect();
    Expr::call("Json.Decode.succeed", vec![constructor]).pipe(stages)
}

fn decode_custom_type(names: &mut Names, variants: &[Variant]) -> Expr {
    let decoders = variants
        .iter()
        .map(|variant| {
            Expr::call(
                prelude::DECODE_VARIANT,
                vec![Expr::str(&variant.name), decode_variant(names, variant)],
            )
        })
        .collect();
    Expr::call(prelude::DECODE_CUSTOM_TYPE, vec![Expr::List(decoders)])
}

fn decode_variant(names: &mut Names, variant: &Variant) -> Expr {
    let constructor = Expr::var(variant.name.clone());
    let args = variant
        .arguments
        .iter()
        .enumerate()
        .map(|(i, type_)| {
            Expr::call(
                prelude::DECODE_VARIANT_ARG,
                vec![Expr::Int(i as i64), decoder(names, type_)],
            )
        })
        .collect::<Vec<_>>();

    match args.len() {
        0 => Expr::call("Json.Decode.succeed", vec![constructor]),
        1 => Expr::call("Json.Decode.map", vec![constructor]).app(args),
        n if n <= MAX_MAP_ARITY => {
            Expr::call(format!("Json.Decode.map{}", n), vec![constructor]).app(args)
        }
        _ => Expr::call("Json.Decode.succeed", vec![constructor]).pipe(
            args.into_iter()
                .map(|arg| Expr::call(prelude::DECODE_AND_MAP, vec![arg]))
                .collect(),
        ),
    }
}
