use thiserror::Error;

/// Why a single declaration could not become part of the schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclError {
    /// Values, destructurings, port signatures and infix declarations all
    /// land here: only type declarations belong in a schema.
    #[error("\"{0}\" is not a type declaration; a schema may only contain type aliases and custom types")]
    IsValue(String),

    #[error("\"{0}\" uses type variables, functions or extensible records, which cannot cross a port")]
    IsParametric(String),

    #[error("\"{declaration}\" applies \"{reference}\" to type arguments; only List, Maybe and Result take arguments")]
    InvalidReference {
        declaration: String,
        reference:   String,
    },

    #[error("\"{declaration}\" uses a tuple of {arity} items; only pairs and triples are supported")]
    InvalidTupleArity {
        declaration: String,
        arity:       usize,
    },

    #[error("The type name \"{0}\" is reserved by the generated code")]
    ReservedName(String),

    #[error("The type \"{0}\" is declared more than once")]
    DuplicateDeclaration(String),

    #[error("\"{declaration}\" refers to \"{reference}\", which is not declared in the schema")]
    UndefinedReference {
        declaration: String,
        reference:   String,
    },
}

/// A failure of a single type annotation, before the enclosing declaration
/// name is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    IsParametric,
    InvalidReference(String),
    InvalidTupleArity(usize),
}

impl TypeError {
    pub fn in_declaration(self, declaration: &str) -> DeclError {
        let declaration = declaration.to_owned();
        match self {
            TypeError::IsParametric => DeclError::IsParametric(declaration),
            TypeError::InvalidReference(reference) => DeclError::InvalidReference {
                declaration,
                reference,
            },
            TypeError::InvalidTupleArity(arity) => DeclError::InvalidTupleArity { declaration, arity },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("The schema must be a plain module, not a port module")]
    IsPortModule,

    #[error("The schema must be a plain module, not an effect module")]
    IsEffectModule,

    #[error("The schema module must expose everything with `exposing (..)`")]
    DoesNotExposeAll,

    #[error("The schema module must not import anything")]
    ContainsImports,

    #[error("The schema contains declarations that cannot be used:\n{}", render_list(.0))]
    ContainsBadDeclarations(Vec<DeclError>),

    #[error("The schema must declare an `OutboundMessage` type")]
    MissingOutboundMessageDeclaration,

    #[error("The schema must declare an `InboundMessage` type")]
    MissingInboundMessageDeclaration,
}

fn render_list(errors: &[DeclError]) -> String {
    errors
        .iter()
        .map(|error| format!("  - {}", error))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("Invalid Elm module name {0}")]
    InvalidModuleName(String),

    #[error("Line width {0} is too narrow; use at least {min}", min = crate::options::MIN_WIDTH)]
    WidthTooSmall(usize),
}

#[derive(Debug, Error)]
pub enum Error {
    /// Reported by whatever turned source text into a module AST.
    #[error("Parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Options(#[from] OptionsError),

    #[error("Template error: {0}")]
    Template(String),
}
