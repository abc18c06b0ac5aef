use crate::{
    ast::Module,
    error::Error,
    extract::extract,
    gen_elm::compile_schema_to_elm,
    gen_ts::{self, compile_schema_to_typescript},
    options::CompileOptions,
    templates::{fill, ELM_TEMPLATE, TYPESCRIPT_TEMPLATE},
};
use port_schema_model::{wire, Schema};
use tracing::{debug, info};

/// The two generated files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    /// The Elm port module with codecs for every schema type.
    pub elm:        String,
    /// TypeScript declarations for the same types and the Elm app.
    pub typescript: String,
}

/// Compile a module AST into both outputs.
/// Returns `Err(Error)` if the options or the module are rejected.
pub fn compile_module(module: &Module, options: &CompileOptions) -> Result<Output, Error> {
    options.validate()?;
    let schema = extract(module)?;
    info!(module = %module.name, declarations = schema.declarations.len(), "schema extracted");
    compile_schema(&schema, options)
}

/// Compile a module AST handed over as JSON.
pub fn compile_json(text: &str, options: &CompileOptions) -> Result<Output, Error> {
    let module: Module = serde_json::from_str(text).map_err(|e| Error::Parse(e.to_string()))?;
    compile_module(&module, options)
}

/// Run both backends over an already validated schema and assemble the
/// templates.
pub fn compile_schema(schema: &Schema, options: &CompileOptions) -> Result<Output, Error> {
    options.validate()?;

    let elm_parts = compile_schema_to_elm(schema, options.width);
    let elm = fill(
        ELM_TEMPLATE,
        &[
            ("module_name", options.module_name.as_str()),
            ("type_declarations", elm_parts.type_declarations.as_str()),
            ("codecs", elm_parts.codecs.as_str()),
            ("variant_tag", wire::VARIANT_TAG),
            ("arg_prefix", wire::ARG_PREFIX),
            ("unit_tag", wire::UNIT_TAG),
            ("just", wire::JUST),
            ("nothing", wire::NOTHING),
            ("ok", wire::OK),
            ("err", wire::ERR),
        ],
    )?;
    debug!(bytes = elm.len(), "Elm module assembled");

    let typescript = fill(
        TYPESCRIPT_TEMPLATE,
        &[
            ("main_module", options.main_module.as_str()),
            ("prelude", gen_ts::prelude().as_str()),
            ("type_declarations", compile_schema_to_typescript(schema).as_str()),
        ],
    )?;
    debug!(bytes = typescript.len(), "TypeScript declarations assembled");

    Ok(Output { elm, typescript })
}
