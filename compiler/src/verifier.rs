use std::collections::HashSet;

use crate::{ast, error::DeclError};
use port_schema_model::Declaration;

/// The type sent from Elm to JavaScript.
pub const OUTBOUND_MESSAGE: &str = "OutboundMessage";
/// The type sent from JavaScript to Elm.
pub const INBOUND_MESSAGE: &str = "InboundMessage";

/// Type names the generated files already use. A schema type with one of
/// these names would define `encode<Name>` or `decode<Name>` a second time
/// next to the prelude helpers, or shadow a built-in type.
pub const RESERVED_NAMES: [&str; 18] = [
    // Elm prelude helpers
    "Unit",
    "Char",
    "Tuple2",
    "Tuple3",
    "Maybe",
    "Result",
    "Record",
    "RecordField",
    "Variant",
    "VariantArg",
    "CustomType",
    "AndMap",
    // built-in types
    "Bool",
    "Int",
    "Float",
    "String",
    "List",
    "Array",
];

fn type_declaration_name(declaration: &ast::Declaration) -> Option<&str> {
    match declaration {
        ast::Declaration::TypeAlias { name, .. } | ast::Declaration::CustomType { name, .. } => {
            Some(name.as_str())
        }
        _ => None,
    }
}

/// Cross-declaration checks: reserved and duplicate names, then references
/// to types the module never declares.
///
/// Every type declaration in `source` counts as declared, even one that
/// failed to map, so a single bad declaration does not also produce an
/// undefined-reference error at each use site.
pub fn verify_declarations(source: &[ast::Declaration], mapped: &[Declaration]) -> Vec<DeclError> {
    let mut errors = Vec::new();
    let mut declared: HashSet<&str> = HashSet::new();

    for name in source.iter().filter_map(type_declaration_name) {
        if !declared.insert(name) {
            errors.push(DeclError::DuplicateDeclaration(name.to_owned()));
        } else if RESERVED_NAMES.contains(&name) {
            errors.push(DeclError::ReservedName(name.to_owned()));
        }
    }

    for declaration in mapped {
        let mut reported = HashSet::new();
        for reference in declaration.references() {
            if !declared.contains(reference) && reported.insert(reference) {
                errors.push(DeclError::UndefinedReference {
                    declaration: declaration.name().to_owned(),
                    reference:   reference.to_owned(),
                });
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::TypeAnnotation;
    use crate::gen_elm::prelude;
    use port_schema_model::SchemaType;

    fn alias(name: &str, annotation: TypeAnnotation) -> ast::Declaration {
        ast::Declaration::TypeAlias { name: name.into(), generics: vec![], annotation }
    }

    #[test]
    fn duplicate_names_are_reported_once_per_repeat() {
        let source = vec![
            alias("A", TypeAnnotation::Unit),
            alias("A", TypeAnnotation::Unit),
            ast::Declaration::Value { name: "A".into() },
        ];
        assert_eq!(
            verify_declarations(&source, &[]),
            vec![DeclError::DuplicateDeclaration("A".into())]
        );
    }

    #[test]
    fn prelude_names_are_reserved() {
        for helper in prelude::ALL {
            let name = helper
                .strip_prefix("encode")
                .or_else(|| helper.strip_prefix("decode"))
                .unwrap();
            assert!(RESERVED_NAMES.contains(&name), "{} is not reserved", name);
        }
    }

    #[test]
    fn reserved_names_are_reported_once() {
        let source = vec![
            alias("Variant", TypeAnnotation::Unit),
            alias("Maybe", TypeAnnotation::Unit),
            alias("Maybe", TypeAnnotation::Unit),
            alias("Variants", TypeAnnotation::Unit),
        ];
        assert_eq!(
            verify_declarations(&source, &[]),
            vec![
                DeclError::ReservedName("Variant".into()),
                DeclError::ReservedName("Maybe".into()),
                DeclError::DuplicateDeclaration("Maybe".into()),
            ]
        );
    }

    #[test]
    fn undefined_references_are_reported_once_per_declaration() {
        let source = vec![alias("Pair", TypeAnnotation::Unit)];
        let mapped = vec![Declaration::TypeAlias {
            name:       "Pair".into(),
            definition: SchemaType::tuple(SchemaType::type_ref("Missing"), SchemaType::type_ref("Missing")),
        }];
        assert_eq!(
            verify_declarations(&source, &mapped),
            vec![DeclError::UndefinedReference { declaration: "Pair".into(), reference: "Missing".into() }]
        );
    }

    #[test]
    fn references_to_unmappable_declarations_are_not_undefined() {
        let source = vec![
            alias("Broken", TypeAnnotation::GenericType { name: "a".into() }),
            alias("User", TypeAnnotation::named("Broken")),
        ];
        let mapped = vec![Declaration::TypeAlias {
            name:       "User".into(),
            definition: SchemaType::type_ref("Broken"),
        }];
        assert!(verify_declarations(&source, &mapped).is_empty());
    }
}
