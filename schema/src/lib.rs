//! The schema model shared by the port-schema compiler and its runtime
//! helpers, plus a reference implementation of the JSON wire format the
//! generated Elm codecs speak.
//!
//! ```
//! use port_schema_model::*;
//!
//! let schema = Schema::new(vec![
//!     Declaration::TypeAlias {
//!         name:       "Point".to_owned(),
//!         definition: SchemaType::record([("x", SchemaType::Int), ("y", SchemaType::Int)]),
//!     },
//! ]);
//!
//! let value = Value::record([("x", Value::Int(1)), ("y", Value::Int(2))]);
//! let json = wire::encode_declaration(&schema, "Point", &value).unwrap();
//! assert_eq!(json.to_string(), r#"{"x":1,"y":2}"#);
//! assert_eq!(wire::decode_declaration(&schema, "Point", &json).unwrap(), value);
//! ```

pub mod schema;
pub mod value;
pub mod wire;

pub use schema::*;
pub use value::*;
pub use wire::WireError;
