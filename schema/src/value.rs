use crate::wire::{ERR, JUST, NOTHING, OK};

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

/// This type holds dynamic port data.
///
/// Values can represent anything a [Schema](crate::Schema) describes and can
/// be converted to and from the JSON wire format with
/// [wire::encode](crate::wire::encode) and [wire::decode](crate::wire::decode).
/// `Maybe` and `Result` values are ordinary [Variant](#variant.Variant)s using
/// the `Just`/`Nothing` and `Ok`/`Err` constructors.
#[derive(Clone, PartialEq)]
pub enum Value {
    Unit,
    Bool(bool),
    Int(i64),
    Float(f64),
    Char(char),
    String(String),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Record(BTreeMap<String, Value>),
    Variant(String, Vec<Value>),
}

impl Value {
    pub fn record<N: Into<String>>(fields: impl IntoIterator<Item = (N, Value)>) -> Value {
        Value::Record(
            fields
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        )
    }

    pub fn variant(name: impl Into<String>, args: Vec<Value>) -> Value {
        Value::Variant(name.into(), args)
    }

    pub fn just(value: Value) -> Value {
        Value::Variant(JUST.to_owned(), vec![value])
    }

    pub fn nothing() -> Value {
        Value::Variant(NOTHING.to_owned(), Vec::new())
    }

    pub fn ok(value: Value) -> Value {
        Value::Variant(OK.to_owned(), vec![value])
    }

    pub fn err(value: Value) -> Value {
        Value::Variant(ERR.to_owned(), vec![value])
    }

    /// A short name for the kind of this value, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Unit => "unit",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Char(_) => "char",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Record(_) => "record",
            Value::Variant(..) => "variant",
        }
    }

    /// A convenience method to extract the value out of a [Bool](#variant.Bool).
    /// Returns `false` for other value kinds.
    pub fn as_bool(&self) -> bool {
        match *self {
            Value::Bool(value) => value,
            _ => false,
        }
    }

    /// A convenience method to extract the value out of an [Int](#variant.Int).
    /// Returns `0` for other value kinds.
    pub fn as_int(&self) -> i64 {
        match *self {
            Value::Int(value) => value,
            _ => 0,
        }
    }

    /// A convenience method to extract the value out of a [Float](#variant.Float).
    /// Returns `0.0` for other value kinds.
    pub fn as_float(&self) -> f64 {
        match *self {
            Value::Float(value) => value,
            _ => 0.0,
        }
    }

    /// A convenience method to extract the value out of a [String](#variant.String).
    /// Returns `""` for other value kinds.
    pub fn as_string(&self) -> &str {
        match *self {
            Value::String(ref value) => value.as_str(),
            _ => "",
        }
    }

    /// A convenience method to get the items out of a [List](#variant.List)
    /// or a [Tuple](#variant.Tuple). Returns an empty slice for other value kinds.
    pub fn as_items(&self) -> &[Value] {
        match *self {
            Value::List(ref values) | Value::Tuple(ref values) => values.as_slice(),
            _ => &[],
        }
    }

    /// A convenience method to extract the constructor name and arguments out
    /// of a [Variant](#variant.Variant). Returns `("", [])` for other value kinds.
    pub fn as_variant(&self) -> (&str, &[Value]) {
        match *self {
            Value::Variant(ref name, ref args) => (name.as_str(), args.as_slice()),
            _ => ("", &[]),
        }
    }

    /// A convenience method to extract a field out of a [Record](#variant.Record).
    /// Returns `None` for other value kinds or if the field isn't present.
    pub fn get(&self, name: &str) -> Option<&Value> {
        match *self {
            Value::Record(ref fields) => fields.get(name),
            _ => None,
        }
    }

    /// A convenience method to update a field on a [Record](#variant.Record).
    /// Does nothing for other value kinds.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        if let Value::Record(ref mut fields) = *self {
            fields.insert(name.into(), value);
        }
    }

    /// A convenience method to append to a [List](#variant.List). Does
    /// nothing for other value kinds.
    pub fn push(&mut self, value: Value) {
        if let Value::List(ref mut values) = *self {
            values.push(value);
        }
    }
}

impl Index<usize> for Value {
    type Output = Value;

    /// A convenience method that adds support for `self[index]` expressions.
    /// It will panic if this value isn't a list, a tuple or a variant, or if
    /// the provided index is out of bounds.
    fn index(&self, index: usize) -> &Value {
        match *self {
            Value::List(ref values) | Value::Tuple(ref values) => &values[index],
            Value::Variant(_, ref args) => &args[index],
            _ => panic!("cannot index into a {} value", self.kind()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match *self {
            Value::Unit => write!(f, "()"),
            Value::Bool(value) => value.fmt(f),
            Value::Int(value) => value.fmt(f),
            Value::Float(value) => value.fmt(f),
            Value::Char(value) => value.fmt(f),
            Value::String(ref value) => value.fmt(f),
            Value::List(ref values) => values.fmt(f),

            Value::Tuple(ref values) => {
                write!(f, "(")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}", value)?;
                }
                write!(f, ")")
            }

            Value::Record(ref fields) => {
                write!(f, "{{")?;
                for (i, (key, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {:?}", key, value)?;
                }
                write!(f, "}}")
            }

            Value::Variant(ref name, ref args) => {
                write!(f, "{}", name)?;
                for arg in args {
                    write!(f, " {:?}", arg)?;
                }
                Ok(())
            }
        }
    }
}
