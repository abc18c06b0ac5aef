//! The shape of a parsed schema module, as delivered by an external Elm
//! parser. Only the parts the extractor inspects are modelled; everything
//! else a parser knows (ranges, comments, expressions) is dropped.
//!
//! All types deserialize from JSON so a host can hand a module over without
//! linking a parser into this crate.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModuleKind {
    Normal,
    Port,
    Effect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Exposing {
    All,
    Explicit { names: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    pub module: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub name:         String,
    pub kind:         ModuleKind,
    pub exposing:     Exposing,
    #[serde(default)]
    pub imports:      Vec<Import>,
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

impl Module {
    /// A normal module exposing everything, with no imports.
    pub fn new(name: impl Into<String>, declarations: Vec<Declaration>) -> Module {
        Module {
            name: name.into(),
            kind: ModuleKind::Normal,
            exposing: Exposing::All,
            imports: Vec::new(),
            declarations,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constructor {
    pub name:      String,
    #[serde(default)]
    pub arguments: Vec<TypeAnnotation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Declaration {
    /// A function or constant, e.g. `answer = 42`.
    Value { name: String },
    /// A top-level pattern binding, e.g. `( a, b ) = pair`.
    Destructuring,
    TypeAlias {
        name:       String,
        #[serde(default)]
        generics:   Vec<String>,
        annotation: TypeAnnotation,
    },
    CustomType {
        name:         String,
        #[serde(default)]
        generics:     Vec<String>,
        constructors: Vec<Constructor>,
    },
    PortSignature {
        name:       String,
        annotation: TypeAnnotation,
    },
    Infix {
        operator: String,
        function: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordField {
    pub name:       String,
    pub annotation: TypeAnnotation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeAnnotation {
    /// `a`
    GenericType { name: String },
    /// `Name arg1 arg2`, possibly qualified (`Dict.Dict`).
    Typed {
        name:      String,
        #[serde(default)]
        arguments: Vec<TypeAnnotation>,
    },
    /// `()`
    Unit,
    /// `( a, b )`
    Tupled { items: Vec<TypeAnnotation> },
    /// `{ a : A }`
    Record { fields: Vec<RecordField> },
    /// `{ r | a : A }`
    GenericRecord {
        variable: String,
        fields:   Vec<RecordField>,
    },
    /// `a -> b`
    Function {
        argument: Box<TypeAnnotation>,
        result:   Box<TypeAnnotation>,
    },
}

impl TypeAnnotation {
    pub fn named(name: impl Into<String>) -> TypeAnnotation {
        TypeAnnotation::Typed { name: name.into(), arguments: Vec::new() }
    }

    pub fn applied(name: impl Into<String>, arguments: Vec<TypeAnnotation>) -> TypeAnnotation {
        TypeAnnotation::Typed { name: name.into(), arguments }
    }

    pub fn record<N: Into<String>>(fields: impl IntoIterator<Item = (N, TypeAnnotation)>) -> TypeAnnotation {
        TypeAnnotation::Record {
            fields: fields
                .into_iter()
                .map(|(name, annotation)| RecordField { name: name.into(), annotation })
                .collect(),
        }
    }
}
