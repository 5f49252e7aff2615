//! Path/method to request/response signature translation.
//!
//! The result is a nested object type: path, then method, then
//! `{ response; request }`. It is emitted as the `Endpoints` declaration.

use tracing::debug;

use crate::document::{OpenApiDocument, Operation, Parameter, PathItem};
use crate::schema::property_type;
use crate::ts::{TsProp, TsType};

/// Build the `Endpoints` mapping for every path in document order.
pub fn translate_endpoints(document: &OpenApiDocument) -> TsType {
    TsType::Object(
        document
            .paths
            .iter()
            .map(|(path, item)| TsProp::required(path.clone(), translate_path(document, item)))
            .collect(),
    )
}

fn translate_path(document: &OpenApiDocument, item: &PathItem) -> TsType {
    TsType::Object(
        item.operations
            .iter()
            .map(|(method, operation)| {
                let params = merge_parameters(document, item.parameters.as_deref(), operation);
                TsProp::required(method.as_str(), operation_signature(operation, &params))
            })
            .collect(),
    )
}

/// `{ response: R; request: Q }` for a single operation.
pub fn operation_signature(operation: &Operation, params: &[&Parameter]) -> TsType {
    let response = operation.json_ok_schema().map_or_else(TsType::any, property_type);
    TsType::Object(vec![
        TsProp::required("response", response),
        TsProp::required("request", request_type(operation, params)),
    ])
}

/// `undefined` when there is nothing to send, else an object with `params`
/// and/or `body`.
fn request_type(operation: &Operation, params: &[&Parameter]) -> TsType {
    let body = operation.json_body_schema();
    if params.is_empty() && body.is_none() {
        return TsType::undefined();
    }

    let mut members = Vec::new();
    if !params.is_empty() {
        let props = params
            .iter()
            .map(|param| TsProp {
                name: param.name.clone(),
                ty: param.schema.as_ref().map_or_else(TsType::any, property_type),
                optional: param.location != "path" && !param.required,
            })
            .collect();
        members.push(TsProp::required("params", TsType::Object(props)));
    }
    if let Some(schema) = body {
        members.push(TsProp::required("body", property_type(schema)));
    }
    TsType::Object(members)
}

/// Path-level parameters followed by the operation's own; an operation
/// parameter replaces a path-level one with the same name and location.
///
/// `$ref` parameters are resolved against `components.parameters`; ones that
/// do not resolve are left out.
pub fn merge_parameters<'a>(
    document: &'a OpenApiDocument,
    shared: Option<&'a [Parameter]>,
    operation: &'a Operation,
) -> Vec<&'a Parameter> {
    let own = resolve_all(document, operation.parameters.as_deref());
    let mut merged: Vec<&Parameter> = resolve_all(document, shared)
        .into_iter()
        .filter(|p| {
            !own.iter()
                .any(|o| o.name == p.name && o.location == p.location)
        })
        .collect();
    merged.extend(own);
    merged
}

fn resolve_all<'a>(
    document: &'a OpenApiDocument,
    params: Option<&'a [Parameter]>,
) -> Vec<&'a Parameter> {
    params
        .unwrap_or_default()
        .iter()
        .filter_map(|param| {
            let resolved = document.resolve_parameter(param);
            if resolved.is_none() {
                debug!(reference = ?param.ref_path, "Skipping unresolvable parameter.");
            }
            resolved
        })
        .collect()
}
