//! OpenAPI document structs for serde deserialization.
//!
//! Only the subset the type generator reads is modelled: component schemas,
//! and per path the five supported methods with their parameters, JSON
//! request body and responses. Everything else in a document is ignored.
//! Maps keep document order.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;

use crate::error::BuildError;

pub(crate) const JSON_MEDIA_TYPE: &str = "application/json";

/// Root of an OpenAPI 3 document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenApiDocument {
    /// Path templates, in document order.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    /// Reusable components, if any.
    pub components: Option<Components>,
}

/// Components section containing reusable schemas and parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Components {
    /// Named schemas, in document order.
    pub schemas: Option<IndexMap<String, Schema>>,
    /// Named parameters referenced as `#/components/parameters/<name>`.
    pub parameters: Option<IndexMap<String, Parameter>>,
}

/// HTTP method of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `get`
    Get,
    /// `post`
    Post,
    /// `put`
    Put,
    /// `patch`
    Patch,
    /// `delete`
    Delete,
}

impl HttpMethod {
    /// Key used for the method in a path item.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "get" => Some(HttpMethod::Get),
            "post" => Some(HttpMethod::Post),
            "put" => Some(HttpMethod::Put),
            "patch" => Some(HttpMethod::Patch),
            "delete" => Some(HttpMethod::Delete),
            _ => None,
        }
    }
}

/// Operations under one path, in document order.
#[derive(Debug, Clone, Default)]
pub struct PathItem {
    /// Supported methods. Other keys (`head`, `options`, ...) are ignored.
    pub operations: Vec<(HttpMethod, Operation)>,
    /// Path-level parameters shared by all operations.
    pub parameters: Option<Vec<Parameter>>,
}

impl<'de> Deserialize<'de> for PathItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PathItemVisitor;

        impl<'de> Visitor<'de> for PathItemVisitor {
            type Value = PathItem;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an OpenAPI path item object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<PathItem, A::Error> {
                let mut item = PathItem::default();
                while let Some(key) = map.next_key::<String>()? {
                    if let Some(method) = HttpMethod::from_key(&key) {
                        if item.operations.iter().any(|(m, _)| *m == method) {
                            return Err(de::Error::duplicate_field(method.as_str()));
                        }
                        item.operations.push((method, map.next_value()?));
                    } else if key == "parameters" {
                        item.parameters = Some(map.next_value()?);
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                Ok(item)
            }
        }

        deserializer.deserialize_map(PathItemVisitor)
    }
}

/// An API operation (endpoint).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Unique operation name.
    pub operation_id: Option<String>,
    /// Operation parameters. They override path-level ones of the same name
    /// and location.
    pub parameters: Option<Vec<Parameter>>,
    /// Request body definition.
    pub request_body: Option<RequestBody>,
    /// Responses keyed by status code or `default`.
    #[serde(default)]
    pub responses: IndexMap<String, Response>,
}

impl Operation {
    /// Schema of the JSON request body, if any.
    pub fn json_body_schema(&self) -> Option<&Schema> {
        self.request_body.as_ref()?.json_schema()
    }

    /// Schema of the JSON body of the `200` response, if any.
    pub fn json_ok_schema(&self) -> Option<&Schema> {
        self.responses.get("200")?.json_schema()
    }
}

/// A parameter (query, path, header or cookie), or a `$ref` to one.
#[derive(Debug, Clone, Deserialize)]
pub struct Parameter {
    /// Parameter name; empty for a reference.
    #[serde(default)]
    pub name: String,
    /// The `in` field: `path`, `query`, `header` or `cookie`.
    #[serde(rename = "in", default)]
    pub location: String,
    /// Whether the caller must supply it.
    #[serde(default)]
    pub required: bool,
    /// Value schema.
    pub schema: Option<Schema>,
    /// Reference to a parameter under `components.parameters`.
    #[serde(rename = "$ref")]
    pub ref_path: Option<String>,
}

/// A request body definition.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestBody {
    /// Bodies keyed by media type.
    pub content: Option<IndexMap<String, MediaType>>,
}

impl RequestBody {
    /// Schema of the `application/json` body.
    pub fn json_schema(&self) -> Option<&Schema> {
        self.content.as_ref()?.get(JSON_MEDIA_TYPE)?.schema.as_ref()
    }
}

/// A response definition.
#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    /// Bodies keyed by media type.
    pub content: Option<IndexMap<String, MediaType>>,
}

impl Response {
    /// Schema of the `application/json` body.
    pub fn json_schema(&self) -> Option<&Schema> {
        self.content.as_ref()?.get(JSON_MEDIA_TYPE)?.schema.as_ref()
    }
}

/// Media type content (e.g., application/json).
#[derive(Debug, Clone, Deserialize)]
pub struct MediaType {
    /// Body schema.
    pub schema: Option<Schema>,
}

/// JSON Schema definition used in OpenAPI.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Schema {
    /// The type of the schema (string, number, integer, boolean, object, array).
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,

    /// Reference to another schema.
    #[serde(rename = "$ref")]
    pub ref_path: Option<String>,

    /// Properties for object types.
    pub properties: Option<IndexMap<String, Schema>>,

    /// Item schema for array types.
    pub items: Option<Box<Schema>>,

    /// OpenAPI 3.0 nullable flag (3.1 uses type arrays instead).
    pub nullable: Option<bool>,
}

/// Schema type can be a single type or an array of types (for nullable).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    /// `"type": "string"`
    Single(String),
    /// `"type": ["string", "null"]`
    Multiple(Vec<String>),
}

impl Schema {
    /// Nullable via the 3.0 flag or a 3.1 type array containing `null`.
    pub fn is_nullable(&self) -> bool {
        if self.nullable == Some(true) {
            return true;
        }
        matches!(
            &self.schema_type,
            Some(SchemaType::Multiple(types)) if types.iter().any(|t| t == "null")
        )
    }

    /// The declared kind, skipping `null` in a type array.
    pub fn kind(&self) -> Option<&str> {
        match self.schema_type.as_ref()? {
            SchemaType::Single(t) => Some(t),
            SchemaType::Multiple(types) => types.iter().map(String::as_str).find(|t| *t != "null"),
        }
    }
}

impl OpenApiDocument {
    /// Parse an OpenAPI document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        serde_json::from_str(json).map_err(|e| BuildError::Parse(e.to_string()))
    }

    /// Parse an OpenAPI document from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, BuildError> {
        serde_yaml::from_str(yaml).map_err(|e| BuildError::Parse(e.to_string()))
    }

    /// Parse JSON or YAML, whichever the text looks like.
    pub fn parse(text: &str) -> Result<Self, BuildError> {
        if text.trim_start().starts_with('{') {
            Self::from_json(text)
        } else {
            Self::from_yaml(text)
        }
    }

    /// Component schemas in document order.
    pub fn schemas(&self) -> impl Iterator<Item = (&String, &Schema)> {
        self.components
            .iter()
            .filter_map(|c| c.schemas.as_ref())
            .flat_map(|schemas| schemas.iter())
    }

    /// Follow a parameter `$ref` into `components.parameters`.
    ///
    /// Inline parameters resolve to themselves. Returns `None` for a
    /// reference naming no component, or for an entry without a name.
    pub fn resolve_parameter<'a>(&'a self, param: &'a Parameter) -> Option<&'a Parameter> {
        let resolved = match &param.ref_path {
            Some(ref_path) => {
                let name = ref_path.rsplit('/').next().unwrap_or(ref_path);
                self.components
                    .as_ref()?
                    .parameters
                    .as_ref()?
                    .get(name)
                    .filter(|target| target.ref_path.is_none())?
            }
            None => param,
        };
        (!resolved.name.is_empty()).then_some(resolved)
    }

    /// Whether `name` is a component schema.
    pub fn has_schema(&self, name: &str) -> bool {
        self.components
            .as_ref()
            .and_then(|c| c.schemas.as_ref())
            .is_some_and(|schemas| schemas.contains_key(name))
    }
}
