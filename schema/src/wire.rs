//! The JSON wire format shared by the generated Elm codecs and the TypeScript
//! declarations, plus a reference encoder/decoder for it.
//!
//! Every tagged value (custom-type variants, `Maybe`, `Result` and unit) is a
//! flat object `{"variant": "<Name>", "_0": .., "_{N-1}": ..}`. Records are
//! plain objects keyed by field name, tuples are fixed-length arrays.

use crate::schema::{Declaration, Schema, SchemaType, Variant};
use crate::value::Value;

use serde_json::{Map, Number, Value as Json};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use thiserror::Error;

/// Discriminant key of every tagged-variant envelope.
pub const VARIANT_TAG: &str = "variant";

/// Prefix of the positional payload keys.
pub const ARG_PREFIX: &str = "_";

/// Largest integer magnitude a JavaScript number holds exactly; Elm `Int`
/// values travel as JavaScript numbers.
pub const MAX_SAFE_INT: i64 = (1 << 53) - 1;

const SAFE_INTS: RangeInclusive<i64> = -MAX_SAFE_INT..=MAX_SAFE_INT;

/// Tag used for the unit value.
pub const UNIT_TAG: &str = "()";

pub const JUST: &str = "Just";
pub const NOTHING: &str = "Nothing";
pub const OK: &str = "Ok";
pub const ERR: &str = "Err";

/// Key of the positional payload at `index` in a tagged-variant envelope.
pub fn arg_key(index: usize) -> String {
    format!("{}{}", ARG_PREFIX, index)
}

#[derive(Debug, Error, PartialEq)]
pub enum WireError {
    #[error("Expected {expected} but found {found}")]
    TypeMismatch {
        expected: String,
        found:    String,
    },

    #[error("Missing field \"{0}\"")]
    MissingField(String),

    #[error("Expected a tuple of {expected} items but found {found}")]
    WrongArity {
        expected: usize,
        found:    usize,
    },

    #[error("Expected exactly one character but found {0:?}")]
    NotAChar(String),

    #[error("Unknown variant \"{found}\", expected one of: {}", .expected.join(", "))]
    UnknownVariant {
        found:    String,
        expected: Vec<String>,
    },

    #[error("Number {0} does not fit the expected type")]
    BadNumber(String),

    #[error("The type \"{0}\" is not declared in the schema")]
    UndefinedType(String),
}

fn mismatch(expected: &str, found: impl Into<String>) -> WireError {
    WireError::TypeMismatch {
        expected: expected.to_owned(),
        found:    found.into(),
    }
}

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}

/// Builds a tagged-variant envelope.
pub fn envelope(name: &str, args: Vec<Json>) -> Json {
    let mut object = Map::new();
    object.insert(VARIANT_TAG.to_owned(), Json::String(name.to_owned()));
    for (i, arg) in args.into_iter().enumerate() {
        object.insert(arg_key(i), arg);
    }
    Json::Object(object)
}

fn maybe_variants(inner: &SchemaType) -> Vec<Variant> {
    vec![
        Variant::new(JUST, vec![inner.clone()]),
        Variant::new(NOTHING, vec![]),
    ]
}

fn result_variants(error: &SchemaType, ok: &SchemaType) -> Vec<Variant> {
    vec![
        Variant::new(OK, vec![ok.clone()]),
        Variant::new(ERR, vec![error.clone()]),
    ]
}

fn lookup<'s>(schema: &'s Schema, name: &str) -> Result<&'s Declaration, WireError> {
    schema
        .get(name)
        .ok_or_else(|| WireError::UndefinedType(name.to_owned()))
}

/// Encodes `value` as the JSON the generated encoder for `type_` would produce.
pub fn encode(schema: &Schema, type_: &SchemaType, value: &Value) -> Result<Json, WireError> {
    match (type_, value) {
        (SchemaType::Unit, Value::Unit) => Ok(envelope(UNIT_TAG, vec![])),
        (SchemaType::Bool, Value::Bool(b)) => Ok(Json::Bool(*b)),
        (SchemaType::Int, Value::Int(i)) if SAFE_INTS.contains(i) => Ok(Json::from(*i)),
        (SchemaType::Int, Value::Int(i)) => Err(WireError::BadNumber(i.to_string())),
        (SchemaType::Float, Value::Float(f)) => Number::from_f64(*f)
            .map(Json::Number)
            .ok_or_else(|| WireError::BadNumber(f.to_string())),
        (SchemaType::Char, Value::Char(c)) => Ok(Json::String(c.to_string())),
        (SchemaType::String, Value::String(s)) => Ok(Json::String(s.clone())),

        (SchemaType::List(element), Value::List(items)) => items
            .iter()
            .map(|item| encode(schema, element, item))
            .collect::<Result<Vec<_>, _>>()
            .map(Json::Array),

        (SchemaType::Tuple(a, b), Value::Tuple(items)) => {
            encode_positional(schema, &[a.as_ref(), b.as_ref()], items)
        }
        (SchemaType::Tuple3(a, b, c), Value::Tuple(items)) => {
            encode_positional(schema, &[a.as_ref(), b.as_ref(), c.as_ref()], items)
        }

        (SchemaType::Record(fields), Value::Record(values)) => {
            let mut object = Map::new();
            for field in fields {
                let value = values
                    .get(&field.name)
                    .ok_or_else(|| WireError::MissingField(field.name.clone()))?;
                object.insert(field.name.clone(), encode(schema, &field.type_, value)?);
            }
            Ok(Json::Object(object))
        }

        (SchemaType::TypeRef(name), _) => encode_declaration(schema, name, value),

        (SchemaType::Maybe(inner), Value::Variant(..)) => {
            encode_variant(schema, &maybe_variants(inner), value)
        }
        (SchemaType::Result(error, ok), Value::Variant(..)) => {
            encode_variant(schema, &result_variants(error, ok), value)
        }

        (_, _) => Err(mismatch(&describe(type_), value.kind())),
    }
}

fn encode_positional(
    schema: &Schema,
    types: &[&SchemaType],
    items: &[Value],
) -> Result<Json, WireError> {
    if types.len() != items.len() {
        return Err(WireError::WrongArity {
            expected: types.len(),
            found:    items.len(),
        });
    }
    types
        .iter()
        .zip(items)
        .map(|(type_, item)| encode(schema, type_, item))
        .collect::<Result<Vec<_>, _>>()
        .map(Json::Array)
}

fn encode_variant(schema: &Schema, variants: &[Variant], value: &Value) -> Result<Json, WireError> {
    let (name, args) = value.as_variant();
    let variant = variants
        .iter()
        .find(|variant| variant.name == name)
        .ok_or_else(|| unknown_variant(name, variants))?;
    if variant.arguments.len() != args.len() {
        return Err(WireError::WrongArity {
            expected: variant.arguments.len(),
            found:    args.len(),
        });
    }
    let encoded = variant
        .arguments
        .iter()
        .zip(args)
        .map(|(type_, arg)| encode(schema, type_, arg))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(envelope(name, encoded))
}

/// Encodes `value` with the encoder generated for the declaration `name`.
pub fn encode_declaration(schema: &Schema, name: &str, value: &Value) -> Result<Json, WireError> {
    match lookup(schema, name)? {
        Declaration::TypeAlias { definition, .. } => encode(schema, definition, value),
        Declaration::CustomType { variants, .. } => match value {
            Value::Variant(..) => encode_variant(schema, variants, value),
            _ => Err(mismatch(name, value.kind())),
        },
    }
}

/// Decodes `json` the way the generated decoder for `type_` would.
pub fn decode(schema: &Schema, type_: &SchemaType, json: &Json) -> Result<Value, WireError> {
    match type_ {
        SchemaType::Unit => {
            decode_variant(schema, &[Variant::new(UNIT_TAG, vec![])], json).map(|_| Value::Unit)
        }
        SchemaType::Bool => json
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| mismatch("a boolean", json_kind(json))),
        SchemaType::Int => match json {
            Json::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
                .filter(|i| SAFE_INTS.contains(i))
                .map(Value::Int)
                .ok_or_else(|| WireError::BadNumber(n.to_string())),
            _ => Err(mismatch("an integer", json_kind(json))),
        },
        SchemaType::Float => json
            .as_f64()
            .map(Value::Float)
            .ok_or_else(|| mismatch("a number", json_kind(json))),
        SchemaType::Char => {
            let s = json
                .as_str()
                .ok_or_else(|| mismatch("a string", json_kind(json)))?;
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Value::Char(c)),
                _ => Err(WireError::NotAChar(s.to_owned())),
            }
        }
        SchemaType::String => json
            .as_str()
            .map(|s| Value::String(s.to_owned()))
            .ok_or_else(|| mismatch("a string", json_kind(json))),

        SchemaType::List(element) => {
            let items = json
                .as_array()
                .ok_or_else(|| mismatch("an array", json_kind(json)))?;
            items
                .iter()
                .map(|item| decode(schema, element, item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List)
        }

        SchemaType::Tuple(a, b) => decode_positional(schema, &[a.as_ref(), b.as_ref()], json),
        SchemaType::Tuple3(a, b, c) => {
            decode_positional(schema, &[a.as_ref(), b.as_ref(), c.as_ref()], json)
        }

        SchemaType::Record(fields) => {
            let object = json
                .as_object()
                .ok_or_else(|| mismatch("an object", json_kind(json)))?;
            let mut values = BTreeMap::new();
            for field in fields {
                let field_json = object
                    .get(&field.name)
                    .ok_or_else(|| WireError::MissingField(field.name.clone()))?;
                values.insert(field.name.clone(), decode(schema, &field.type_, field_json)?);
            }
            Ok(Value::Record(values))
        }

        SchemaType::TypeRef(name) => decode_declaration(schema, name, json),
        SchemaType::Maybe(inner) => decode_variant(schema, &maybe_variants(inner), json),
        SchemaType::Result(error, ok) => decode_variant(schema, &result_variants(error, ok), json),
    }
}

fn decode_positional(schema: &Schema, types: &[&SchemaType], json: &Json) -> Result<Value, WireError> {
    let items = json
        .as_array()
        .ok_or_else(|| mismatch("an array", json_kind(json)))?;
    if items.len() < types.len() {
        return Err(WireError::WrongArity {
            expected: types.len(),
            found:    items.len(),
        });
    }
    types
        .iter()
        .zip(items)
        .map(|(type_, item)| decode(schema, type_, item))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Tuple)
}

fn unknown_variant(found: &str, variants: &[Variant]) -> WireError {
    WireError::UnknownVariant {
        found:    found.to_owned(),
        expected: variants.iter().map(|variant| variant.name.clone()).collect(),
    }
}

fn decode_variant(schema: &Schema, variants: &[Variant], json: &Json) -> Result<Value, WireError> {
    let object = json
        .as_object()
        .ok_or_else(|| mismatch("an object", json_kind(json)))?;
    let tag = object
        .get(VARIANT_TAG)
        .ok_or_else(|| WireError::MissingField(VARIANT_TAG.to_owned()))?;
    let tag = tag
        .as_str()
        .ok_or_else(|| mismatch("a string", json_kind(tag)))?;
    let variant = variants
        .iter()
        .find(|variant| variant.name == tag)
        .ok_or_else(|| unknown_variant(tag, variants))?;

    let mut args = Vec::with_capacity(variant.arguments.len());
    for (i, type_) in variant.arguments.iter().enumerate() {
        let key = arg_key(i);
        let arg = object.get(&key).ok_or(WireError::MissingField(key))?;
        args.push(decode(schema, type_, arg)?);
    }
    Ok(Value::Variant(variant.name.clone(), args))
}

/// Decodes `json` with the decoder generated for the declaration `name`.
pub fn decode_declaration(schema: &Schema, name: &str, json: &Json) -> Result<Value, WireError> {
    match lookup(schema, name)? {
        Declaration::TypeAlias { definition, .. } => decode(schema, definition, json),
        Declaration::CustomType { variants, .. } => decode_variant(schema, variants, json),
    }
}

fn describe(type_: &SchemaType) -> String {
    match type_ {
        SchemaType::Unit => "unit".to_owned(),
        SchemaType::Bool => "bool".to_owned(),
        SchemaType::Int => "int".to_owned(),
        SchemaType::Float => "float".to_owned(),
        SchemaType::Char => "char".to_owned(),
        SchemaType::String => "string".to_owned(),
        SchemaType::List(_) => "list".to_owned(),
        SchemaType::Tuple(..) | SchemaType::Tuple3(..) => "tuple".to_owned(),
        SchemaType::Record(_) => "record".to_owned(),
        SchemaType::TypeRef(name) => name.clone(),
        SchemaType::Maybe(_) => "Maybe".to_owned(),
        SchemaType::Result(..) => "Result".to_owned(),
    }
}
