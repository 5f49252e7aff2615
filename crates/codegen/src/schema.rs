//! Component schema to TypeScript type translation.

use tracing::debug;

use crate::document::{OpenApiDocument, Schema};
use crate::error::BuildError;
use crate::overrides::TypeOverrides;
use crate::ts::{TsPrimitive, TsProp, TsType, TsTypeDef, TypeDefKind};

/// Schema name from a `$ref` pointer: its last `/` segment.
pub fn ref_to_schema_name(ref_path: &str) -> &str {
    ref_path.rsplit('/').next().unwrap_or(ref_path)
}

/// Map a JSON schema primitive kind to a TypeScript type.
pub fn primitive_to_ts(kind: Option<&str>) -> TsType {
    match kind {
        Some("integer" | "number") => TsType::Primitive(TsPrimitive::Number),
        Some("string") => TsType::Primitive(TsPrimitive::String),
        Some("boolean") => TsType::Primitive(TsPrimitive::Boolean),
        _ => TsType::any(),
    }
}

/// Type expression of a property, parameter or body schema.
///
/// `$ref` becomes the referenced name, arrays become `item[]`, and primitive
/// kinds go through [`primitive_to_ts`]. Inline objects are `any`.
pub fn property_type(schema: &Schema) -> TsType {
    if let Some(ref_path) = &schema.ref_path {
        return TsType::Ref(ref_to_schema_name(ref_path).to_string());
    }

    match schema.kind() {
        Some("array") => TsType::array(
            schema
                .items
                .as_deref()
                .map_or_else(TsType::any, property_type),
        ),
        kind => primitive_to_ts(kind),
    }
}

/// Translate one named schema into a declaration.
///
/// Overridden names become an alias to the override's literal text, even if
/// the document gives them properties.
pub fn schema_to_typedef(name: &str, schema: &Schema, overrides: &TypeOverrides) -> TsTypeDef {
    if let Some(literal) = overrides.get(name) {
        debug!(schema = name, literal, "Using type override.");
        return TsTypeDef {
            name: name.to_string(),
            kind: TypeDefKind::Alias {
                ty: TsType::Raw(literal.to_string()),
            },
        };
    }

    let kind = match (&schema.properties, schema.kind()) {
        (Some(properties), _) => TypeDefKind::Structural {
            properties: properties
                .iter()
                .map(|(prop_name, prop)| TsProp {
                    name: prop_name.clone(),
                    ty: property_type(prop),
                    optional: prop.is_nullable(),
                })
                .collect(),
        },
        (None, Some("object") | None) if schema.ref_path.is_none() => TypeDefKind::Structural {
            properties: Vec::new(),
        },
        (None, _) => TypeDefKind::Alias {
            ty: property_type(schema),
        },
    };

    TsTypeDef {
        name: name.to_string(),
        kind,
    }
}

/// Translate every component schema, in document order.
pub fn translate_schemas(document: &OpenApiDocument, overrides: &TypeOverrides) -> Vec<TsTypeDef> {
    document
        .schemas()
        .map(|(name, schema)| schema_to_typedef(name, schema, overrides))
        .collect()
}

/// Fail on the first `$ref` in `schema` that names no component schema.
pub(crate) fn check_refs(
    schema: &Schema,
    document: &OpenApiDocument,
    location: &str,
) -> Result<(), BuildError> {
    if let Some(ref_path) = &schema.ref_path
        && !document.has_schema(ref_to_schema_name(ref_path))
    {
        return Err(BuildError::UnresolvedReference {
            reference: ref_path.clone(),
            location: location.to_string(),
        });
    }
    if let Some(items) = &schema.items {
        check_refs(items, document, location)?;
    }
    if let Some(properties) = &schema.properties {
        for (name, prop) in properties {
            check_refs(prop, document, &format!("{location}.{name}"))?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ts::Emit;

    fn schema(json: serde_json::Value) -> Schema {
        serde_json::from_value(json).unwrap()
    }

    fn emit(name: &str, json: serde_json::Value) -> String {
        schema_to_typedef(name, &schema(json), &TypeOverrides::default()).emit()
    }

    #[test]
    fn test_nullable_property_is_optional() {
        let out = emit(
            "Person",
            serde_json::json!({
                "type": "object",
                "properties": { "name": { "type": "string", "nullable": true } }
            }),
        );
        assert!(out.contains("\tname?: string;"), "{out}");

        let out = emit(
            "Person",
            serde_json::json!({
                "type": "object",
                "properties": { "name": { "type": "string", "nullable": false } }
            }),
        );
        assert!(out.contains("\tname: string;"), "{out}");
    }

    #[test]
    fn test_ref_and_array_expressions() {
        let widget = schema(serde_json::json!({ "$ref": "#/components/schemas/Widget" }));
        assert_eq!(property_type(&widget).emit(), "Widget");

        let ints = schema(serde_json::json!({ "type": "array", "items": { "type": "integer" } }));
        assert_eq!(property_type(&ints).emit(), "number[]");

        let refs = schema(serde_json::json!({
            "type": "array",
            "items": { "$ref": "#/components/schemas/Widget" }
        }));
        assert_eq!(property_type(&refs).emit(), "Widget[]");

        let nested = schema(serde_json::json!({
            "type": "array",
            "items": { "type": "array", "items": { "type": "boolean" } }
        }));
        assert_eq!(property_type(&nested).emit(), "boolean[][]");

        let untyped = schema(serde_json::json!({ "type": "array" }));
        assert_eq!(property_type(&untyped).emit(), "any[]");
    }

    #[test]
    fn test_primitive_table() {
        assert_eq!(primitive_to_ts(Some("integer")).emit(), "number");
        assert_eq!(primitive_to_ts(Some("number")).emit(), "number");
        assert_eq!(primitive_to_ts(Some("string")).emit(), "string");
        assert_eq!(primitive_to_ts(Some("boolean")).emit(), "boolean");
        assert_eq!(primitive_to_ts(Some("object")).emit(), "any");
        assert_eq!(primitive_to_ts(None).emit(), "any");
    }

    #[test]
    fn test_override_beats_structure() {
        let out = emit(
            "Guid",
            serde_json::json!({
                "type": "object",
                "properties": { "value": { "type": "string" } }
            }),
        );
        assert_eq!(out, "export type Guid = string;\n");
    }

    #[test]
    fn test_property_order_is_preserved() {
        let order: Schema = serde_json::from_str(
            r##"{ "type": "object", "properties": {
                "zulu": { "type": "integer" },
                "alpha": { "$ref": "#/components/schemas/Item" },
                "mike": { "type": "array", "items": { "type": "string" }, "nullable": true }
            } }"##,
        )
        .unwrap();
        assert_eq!(
            schema_to_typedef("Order", &order, &TypeOverrides::default()).emit(),
            "export type Order = {\n\tzulu: number;\n\talpha: Item;\n\tmike?: string[];\n};\n"
        );
    }

    #[test]
    fn test_schema_without_properties() {
        assert_eq!(
            emit("Status", serde_json::json!({ "type": "string", "enum": ["a", "b"] })),
            "export type Status = string;\n"
        );
        assert_eq!(
            emit("Ids", serde_json::json!({ "type": "array", "items": { "type": "integer" } })),
            "export type Ids = number[];\n"
        );
        assert_eq!(
            emit("Empty", serde_json::json!({ "type": "object" })),
            "export type Empty = {\n};\n"
        );
        assert_eq!(
            emit("Alias", serde_json::json!({ "$ref": "#/components/schemas/Other" })),
            "export type Alias = Other;\n"
        );
    }

    #[test]
    fn test_ref_name_is_last_segment() {
        assert_eq!(ref_to_schema_name("#/components/schemas/Widget"), "Widget");
        assert_eq!(ref_to_schema_name("#/definitions/Legacy"), "Legacy");
        assert_eq!(ref_to_schema_name("Bare"), "Bare");
    }

    #[test]
    fn test_check_refs_reports_location() {
        let document = OpenApiDocument::parse(
            r##"{ "paths": {}, "components": { "schemas": { "Item": { "type": "object" } } } }"##,
        )
        .unwrap();
        let ok = schema(serde_json::json!({
            "type": "array",
            "items": { "$ref": "#/components/schemas/Item" }
        }));
        assert!(check_refs(&ok, &document, "X").is_ok());

        let bad = schema(serde_json::json!({
            "type": "object",
            "properties": { "owner": { "$ref": "#/components/schemas/User" } }
        }));
        let err = check_refs(&bad, &document, "Order").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unresolved reference '#/components/schemas/User' in Order.owner"
        );
    }
}
