use serde::Serialize;

/// A type that can cross the port boundary.
///
/// References to other declarations are kept by name (`TypeRef`), so
/// recursive and mutually recursive declarations never need a cyclic value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SchemaType {
    Unit,
    Bool,
    Int,
    Float,
    Char,
    String,
    List(Box<SchemaType>),
    Tuple(Box<SchemaType>, Box<SchemaType>),
    Tuple3(Box<SchemaType>, Box<SchemaType>, Box<SchemaType>),
    Record(Vec<Field>),
    TypeRef(String),
    Maybe(Box<SchemaType>),
    Result(Box<SchemaType>, Box<SchemaType>),
}

impl SchemaType {
    pub fn list(element: SchemaType) -> SchemaType {
        SchemaType::List(Box::new(element))
    }

    pub fn tuple(first: SchemaType, second: SchemaType) -> SchemaType {
        SchemaType::Tuple(Box::new(first), Box::new(second))
    }

    pub fn tuple3(first: SchemaType, second: SchemaType, third: SchemaType) -> SchemaType {
        SchemaType::Tuple3(Box::new(first), Box::new(second), Box::new(third))
    }

    pub fn maybe(inner: SchemaType) -> SchemaType {
        SchemaType::Maybe(Box::new(inner))
    }

    pub fn result(error: SchemaType, ok: SchemaType) -> SchemaType {
        SchemaType::Result(Box::new(error), Box::new(ok))
    }

    pub fn type_ref(name: impl Into<String>) -> SchemaType {
        SchemaType::TypeRef(name.into())
    }

    pub fn record<N: Into<String>>(fields: impl IntoIterator<Item = (N, SchemaType)>) -> SchemaType {
        SchemaType::Record(
            fields
                .into_iter()
                .map(|(name, type_)| Field::new(name, type_))
                .collect(),
        )
    }

    /// Calls `f` with the name of every declaration this type refers to,
    /// in left-to-right order. Duplicates are reported each time they occur.
    pub fn for_each_reference<'a>(&'a self, f: &mut impl FnMut(&'a str)) {
        match self {
            SchemaType::Unit
            | SchemaType::Bool
            | SchemaType::Int
            | SchemaType::Float
            | SchemaType::Char
            | SchemaType::String => {}
            SchemaType::List(inner) | SchemaType::Maybe(inner) => inner.for_each_reference(f),
            SchemaType::Tuple(a, b) | SchemaType::Result(a, b) => {
                a.for_each_reference(f);
                b.for_each_reference(f);
            }
            SchemaType::Tuple3(a, b, c) => {
                a.for_each_reference(f);
                b.for_each_reference(f);
                c.for_each_reference(f);
            }
            SchemaType::Record(fields) => {
                for field in fields {
                    field.type_.for_each_reference(f);
                }
            }
            SchemaType::TypeRef(name) => f(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name:  String,
    #[serde(rename = "type")]
    pub type_: SchemaType,
}

impl Field {
    pub fn new(name: impl Into<String>, type_: SchemaType) -> Field {
        Field { name: name.into(), type_ }
    }
}

/// One constructor of a custom type, with its positional arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variant {
    pub name:      String,
    pub arguments: Vec<SchemaType>,
}

impl Variant {
    pub fn new(name: impl Into<String>, arguments: Vec<SchemaType>) -> Variant {
        Variant { name: name.into(), arguments }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Declaration {
    TypeAlias {
        name:       String,
        definition: SchemaType,
    },
    CustomType {
        name:     String,
        variants: Vec<Variant>,
    },
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::TypeAlias { name, .. } | Declaration::CustomType { name, .. } => name,
        }
    }

    /// Every declaration name referenced from this declaration's body.
    pub fn references(&self) -> Vec<&str> {
        let mut names = Vec::new();
        match self {
            Declaration::TypeAlias { definition, .. } => {
                definition.for_each_reference(&mut |name| names.push(name))
            }
            Declaration::CustomType { variants, .. } => {
                for variant in variants {
                    for argument in &variant.arguments {
                        argument.for_each_reference(&mut |name| names.push(name));
                    }
                }
            }
        }
        names
    }
}

/// The validated, read-only set of declarations, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schema {
    pub declarations: Vec<Declaration>,
}

impl Schema {
    pub fn new(declarations: Vec<Declaration>) -> Schema {
        Schema { declarations }
    }

    /// Looks a declaration up by name. Names are unique in an extracted schema.
    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|decl| decl.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn references_are_reported_in_order() {
        let decl = Declaration::CustomType {
            name:     "Tree".into(),
            variants: vec![
                Variant::new("Leaf", vec![]),
                Variant::new(
                    "Node",
                    vec![
                        SchemaType::type_ref("Tree"),
                        SchemaType::record([("label", SchemaType::maybe(SchemaType::type_ref("Label")))]),
                        SchemaType::type_ref("Tree"),
                    ],
                ),
            ],
        };

        assert_eq!(decl.references(), vec!["Tree", "Label", "Tree"]);
    }

    #[test]
    fn get_finds_declarations_by_name() {
        let schema = Schema::new(vec![
            Declaration::TypeAlias { name: "A".into(), definition: SchemaType::Int },
            Declaration::TypeAlias { name: "B".into(), definition: SchemaType::type_ref("A") },
        ]);

        assert_eq!(schema.get("B").map(Declaration::name), Some("B"));
        assert!(schema.contains("A"));
        assert!(!schema.contains("C"));
    }
}
