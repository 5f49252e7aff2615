//! Request-side types: methods, parameters, bodies and the descriptor that
//! travels through the interceptor.

use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// HTTP method of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl Method {
    /// Lower-case name as it appears in an OpenAPI path item.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Post => "post",
            Method::Put => "put",
            Method::Patch => "patch",
            Method::Delete => "delete",
        }
    }

    pub(crate) fn to_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scalar value used for path substitution and query construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Rendered as `true` / `false`.
    Bool(bool),
    /// Integral number.
    Integer(i64),
    /// Floating-point number.
    Float(f64),
    /// Inserted verbatim into paths, percent-encoded in queries.
    String(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Integer(i) => write!(f, "{i}"),
            ParamValue::Float(n) => write!(f, "{n}"),
            ParamValue::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Integer(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Integer(i64::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Integer(i64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

/// Parameter mapping. Iteration order is insertion order, which is the order
/// leftover keys end up in the query string.
pub type Params = IndexMap<String, ParamValue>;

/// Build a [`Params`] map from `key => value` pairs.
///
/// ```
/// use openapi_fetch_client::params;
/// let p = params! { "id" => 7, "verbose" => true };
/// assert_eq!(p.len(), 2);
/// ```
#[macro_export]
macro_rules! params {
    () => { $crate::Params::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::Params::new();
        $( map.insert(::std::string::String::from($key), $crate::ParamValue::from($value)); )+
        map
    }};
}

/// One part of a multipart form.
#[derive(Debug, Clone)]
pub enum FormPart {
    /// Plain form field.
    Text {
        /// Field name.
        name: String,
        /// Field value.
        value: String,
    },
    /// Binary field, usually a file upload.
    Bytes {
        /// Field name.
        name: String,
        /// File contents.
        data: Bytes,
        /// File name reported to the server.
        file_name: Option<String>,
        /// Part content type; the transport default when `None`.
        mime: Option<String>,
    },
}

/// Binary multipart payload. Sent unmodified; the transport picks the
/// boundary and therefore the content type.
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

impl MultipartForm {
    /// Empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text field.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Add a file field.
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime: Option<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        self.parts.push(FormPart::Bytes {
            name: name.into(),
            data: data.into(),
            file_name: Some(file_name.into()),
            mime,
        });
        self
    }

    /// Parts in insertion order.
    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }
}

/// Request payload.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// Structured value, serialized to JSON text before sending.
    Json(serde_json::Value),
    /// Multipart payload, passed through as-is.
    Multipart(MultipartForm),
}

impl RequestBody {
    /// Serialize any `Serialize` value into a JSON body.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(RequestBody::Json)
    }

    /// True for multipart payloads, which carry their own content type.
    pub fn is_multipart(&self) -> bool {
        matches!(self, RequestBody::Multipart(_))
    }
}

impl From<serde_json::Value> for RequestBody {
    fn from(value: serde_json::Value) -> Self {
        RequestBody::Json(value)
    }
}

impl From<MultipartForm> for RequestBody {
    fn from(value: MultipartForm) -> Self {
        RequestBody::Multipart(value)
    }
}

/// How a response body is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    /// UTF-8 text.
    Text,
    /// Parsed JSON value.
    Json,
    /// Raw bytes, untouched.
    Blob,
}

/// Per-call options of [`Client::request`](crate::Client::request).
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Path placeholders first; the rest go to the query string.
    pub params: Option<Params>,
    /// Request body. JSON bodies are serialized before sending.
    pub body: Option<RequestBody>,
    /// Extra headers. They replace defaults of the same name, ignoring case.
    pub headers: HashMap<String, String>,
    /// `None` infers the mode from the response `Content-Type`.
    pub response_type: Option<ResponseType>,
    /// Decode mode for non-2xx bodies. `None` infers it the same way.
    pub error_response_type: Option<ResponseType>,
}

impl RequestOptions {
    /// Options with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the parameter map.
    pub fn params(mut self, params: Params) -> Self {
        self.params = Some(params);
        self
    }

    /// Set the request body.
    pub fn body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Add one header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Force the decode mode of 2xx bodies.
    pub fn response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = Some(response_type);
        self
    }

    /// Force the decode mode of non-2xx bodies.
    pub fn error_response_type(mut self, response_type: ResponseType) -> Self {
        self.error_response_type = Some(response_type);
        self
    }
}

/// Fully populated request, handed to the interceptor.
///
/// Interceptors may change any field before running the continuation. The
/// target URL is computed from `base_url`, `url` and `params` when the
/// continuation runs.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// Normalized base address of the client.
    pub base_url: String,
    /// Path template, or an absolute URL.
    pub url: String,
    /// HTTP method.
    pub method: Method,
    /// Caller headers. Defaults are added when the continuation runs.
    pub headers: HashMap<String, String>,
    /// Request body, if any.
    pub body: Option<RequestBody>,
    /// Parameters for placeholders and the query string.
    pub params: Option<Params>,
    /// Decode mode for 2xx bodies; inferred when `None`.
    pub response_type: Option<ResponseType>,
    /// Decode mode for non-2xx bodies; inferred when `None`.
    pub error_response_type: Option<ResponseType>,
}

impl RequestDescriptor {
    pub(crate) fn new(
        base_url: &str,
        url: &str,
        method: Method,
        options: RequestOptions,
    ) -> Self {
        Self {
            base_url: base_url.to_string(),
            url: url.to_string(),
            method,
            headers: options.headers,
            body: options.body,
            params: options.params,
            response_type: options.response_type,
            error_response_type: options.error_response_type,
        }
    }

    /// The request target after base-address resolution and substitution.
    pub fn target(&self) -> String {
        crate::url::build_request_url(&self.base_url, &self.url, self.params.as_ref())
    }
}
