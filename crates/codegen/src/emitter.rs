//! TypeScript declaration file emitter.
//!
//! The pipeline is:
//! 1. Validate: every `$ref` resolves (only with `strict_refs`)
//! 2. Translate: paths -> `Endpoints` mapping, component schemas -> declarations
//! 3. Emit: IR -> String (via Emit trait)

use crate::document::OpenApiDocument;
use crate::endpoint::{merge_parameters, translate_endpoints};
use crate::error::BuildError;
use crate::overrides::TypeOverrides;
use crate::schema::{check_refs, translate_schemas};
use crate::ts::Emit;

/// Per-run generation switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    /// Reject documents whose `$ref` pointers name missing schemas.
    pub strict_refs: bool,
}

/// Generate the declaration file text for one document.
pub fn generate(
    document: &OpenApiDocument,
    overrides: &TypeOverrides,
    options: &GenerateOptions,
) -> Result<String, BuildError> {
    if options.strict_refs {
        validate_refs(document)?;
    }

    let mut output = format!(
        "export type Endpoints = {};\n",
        translate_endpoints(document).emit_block(0, 2)
    );
    for typedef in translate_schemas(document, overrides) {
        output.push('\n');
        output.push_str(&typedef.emit());
    }
    Ok(output)
}

fn validate_refs(document: &OpenApiDocument) -> Result<(), BuildError> {
    for (name, schema) in document.schemas() {
        check_refs(schema, document, name)?;
    }

    for (path, item) in &document.paths {
        for (method, operation) in &item.operations {
            let location = format!("{} {path}", method.as_str());
            let raw = item.parameters.iter().chain(&operation.parameters).flatten();
            for param in raw {
                if let Some(reference) = &param.ref_path
                    && document.resolve_parameter(param).is_none()
                {
                    return Err(BuildError::UnresolvedReference {
                        reference: reference.clone(),
                        location: format!("{location} parameters"),
                    });
                }
            }
            for param in merge_parameters(document, item.parameters.as_deref(), operation) {
                if let Some(schema) = &param.schema {
                    let param_location = format!("{location} parameter {}", param.name);
                    check_refs(schema, document, &param_location)?;
                }
            }
            if let Some(schema) = operation.json_body_schema() {
                check_refs(schema, document, &format!("{location} request body"))?;
            }
            if let Some(schema) = operation.json_ok_schema() {
                check_refs(schema, document, &format!("{location} response"))?;
            }
        }
    }
    Ok(())
}
