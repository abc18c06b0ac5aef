use crate::{
    ast::{self, Exposing, Module, ModuleKind, TypeAnnotation},
    error::{DeclError, SchemaError, TypeError},
    verifier::{verify_declarations, INBOUND_MESSAGE, OUTBOUND_MESSAGE},
};
use port_schema_model::{Declaration, Field, Schema, SchemaType, Variant};
use tracing::{debug, trace};

/// Turns a parsed module into a [`Schema`].
///
/// Module-level preconditions are checked first and the first failure wins.
/// Declaration failures are then collected from every declaration and
/// reported together; the required message types are checked last.
pub fn extract(module: &Module) -> Result<Schema, SchemaError> {
    match module.kind {
        ModuleKind::Port => return Err(SchemaError::IsPortModule),
        ModuleKind::Effect => return Err(SchemaError::IsEffectModule),
        ModuleKind::Normal => {}
    }
    if !matches!(module.exposing, Exposing::All) {
        return Err(SchemaError::DoesNotExposeAll);
    }
    if !module.imports.is_empty() {
        return Err(SchemaError::ContainsImports);
    }

    let mut declarations = Vec::with_capacity(module.declarations.len());
    let mut errors = Vec::new();
    for declaration in &module.declarations {
        match map_declaration(declaration) {
            Ok(declaration) => declarations.push(declaration),
            Err(error) => errors.push(error),
        }
    }
    errors.extend(verify_declarations(&module.declarations, &declarations));

    if !errors.is_empty() {
        debug!(count = errors.len(), module = %module.name, "rejecting schema with bad declarations");
        return Err(SchemaError::ContainsBadDeclarations(errors));
    }

    let schema = Schema::new(declarations);
    if !schema.contains(OUTBOUND_MESSAGE) {
        return Err(SchemaError::MissingOutboundMessageDeclaration);
    }
    if !schema.contains(INBOUND_MESSAGE) {
        return Err(SchemaError::MissingInboundMessageDeclaration);
    }

    debug!(declarations = schema.declarations.len(), module = %module.name, "extracted schema");
    Ok(schema)
}

/// Maps one module-level declaration. Within a declaration the first failing
/// type wins.
pub fn map_declaration(declaration: &ast::Declaration) -> Result<Declaration, DeclError> {
    match declaration {
        ast::Declaration::Value { name } | ast::Declaration::PortSignature { name, .. } => {
            Err(DeclError::IsValue(name.clone()))
        }
        ast::Declaration::Destructuring => Err(DeclError::IsValue("<destructuring>".to_owned())),
        ast::Declaration::Infix { operator, .. } => Err(DeclError::IsValue(format!("({})", operator))),

        ast::Declaration::TypeAlias { name, generics, annotation } => {
            trace!(name = %name, "mapping type alias");
            if !generics.is_empty() {
                return Err(DeclError::IsParametric(name.clone()));
            }
            let definition = map_type(annotation).map_err(|e| e.in_declaration(name))?;
            Ok(Declaration::TypeAlias { name: name.clone(), definition })
        }

        ast::Declaration::CustomType { name, generics, constructors } => {
            trace!(name = %name, "mapping custom type");
            if !generics.is_empty() {
                return Err(DeclError::IsParametric(name.clone()));
            }
            let variants = constructors
                .iter()
                .map(|constructor| -> Result<Variant, TypeError> {
                    let arguments = constructor
                        .arguments
                        .iter()
                        .map(map_type)
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(Variant::new(constructor.name.clone(), arguments))
                })
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| e.in_declaration(name))?;
            Ok(Declaration::CustomType { name: name.clone(), variants })
        }
    }
}

/// Maps a type annotation onto the schema's closed set of types.
pub fn map_type(annotation: &TypeAnnotation) -> Result<SchemaType, TypeError> {
    match annotation {
        TypeAnnotation::Unit => Ok(SchemaType::Unit),

        TypeAnnotation::Typed { name, arguments } => match (name.as_str(), arguments.as_slice()) {
            ("Bool", []) => Ok(SchemaType::Bool),
            ("Int", []) => Ok(SchemaType::Int),
            ("Float", []) => Ok(SchemaType::Float),
            ("Char", []) => Ok(SchemaType::Char),
            ("String", []) => Ok(SchemaType::String),
            (_, []) => Ok(SchemaType::TypeRef(name.clone())),
            ("List", [element]) => Ok(SchemaType::list(map_type(element)?)),
            ("Maybe", [inner]) => Ok(SchemaType::maybe(map_type(inner)?)),
            ("Result", [error, ok]) => Ok(SchemaType::result(map_type(error)?, map_type(ok)?)),
            (_, _) => Err(TypeError::InvalidReference(name.clone())),
        },

        TypeAnnotation::Tupled { items } => match items.as_slice() {
            [a, b] => Ok(SchemaType::tuple(map_type(a)?, map_type(b)?)),
            [a, b, c] => Ok(SchemaType::tuple3(map_type(a)?, map_type(b)?, map_type(c)?)),
            _ => Err(TypeError::InvalidTupleArity(items.len())),
        },

        TypeAnnotation::Record { fields } => fields
            .iter()
            .map(|field| -> Result<Field, TypeError> {
                Ok(Field::new(field.name.clone(), map_type(&field.annotation)?))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(SchemaType::Record),

        TypeAnnotation::GenericType { .. }
        | TypeAnnotation::GenericRecord { .. }
        | TypeAnnotation::Function { .. } => Err(TypeError::IsParametric),
    }
}
