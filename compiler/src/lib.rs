//! port-schema-compiler
//!
//! This crate implements:
//!  1) The module AST handed over by an Elm parser (`ast`),
//!  2) Schema extraction and verification (non-type declarations, generics,
//!     bad references, duplicates, missing message types),
//!  3) A Wadler-style pretty printer (`pretty`) and a small Elm syntax tree,
//!  4) Code generation: Elm codecs (`compile_schema_to_elm`) and TypeScript
//!     declarations (`compile_schema_to_typescript`),
//!  5) Template assembly (`compile_module` → `Output`) and error types.

pub mod ast;
pub mod compiler;
pub mod elm;
pub mod error;
pub mod extract;
pub mod gen_elm;
pub mod gen_ts;
pub mod options;
pub mod pretty;
pub mod templates;
pub mod utils;
pub mod verifier;

pub use compiler::{compile_json, compile_module, compile_schema, Output};
pub use error::{DeclError, Error, OptionsError, SchemaError};
pub use extract::extract;
pub use gen_elm::compile_schema_to_elm;
pub use gen_ts::compile_schema_to_typescript;
pub use options::CompileOptions;
