//! Response decoding, status labels and the result handed back to callers.

use std::fmt;

use bytes::Bytes;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use serde::de::DeserializeOwned;

use crate::error::DecodeError;
use crate::request::ResponseType;

/// Human-readable label derived from a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusLabel {
    /// 200
    Success,
    /// 400
    BadRequest,
    /// 401
    UnAuthorized,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 409
    Conflict,
    /// 422
    UnprocessableEntity,
    /// 500
    InternalServerError,
    /// Any other status, including non-200 successes.
    Unknown,
}

impl StatusLabel {
    /// Label for `status`.
    pub fn from_status(status: u16) -> Self {
        match status {
            200 => StatusLabel::Success,
            400 => StatusLabel::BadRequest,
            401 => StatusLabel::UnAuthorized,
            403 => StatusLabel::Forbidden,
            404 => StatusLabel::NotFound,
            409 => StatusLabel::Conflict,
            422 => StatusLabel::UnprocessableEntity,
            500 => StatusLabel::InternalServerError,
            _ => StatusLabel::Unknown,
        }
    }

    /// Variant name, as shown in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            StatusLabel::Success => "Success",
            StatusLabel::BadRequest => "BadRequest",
            StatusLabel::UnAuthorized => "UnAuthorized",
            StatusLabel::Forbidden => "Forbidden",
            StatusLabel::NotFound => "NotFound",
            StatusLabel::Conflict => "Conflict",
            StatusLabel::UnprocessableEntity => "UnprocessableEntity",
            StatusLabel::InternalServerError => "InternalServerError",
            StatusLabel::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// UTF-8 text.
    Text(String),
    /// Parsed JSON.
    Json(serde_json::Value),
    /// Raw bytes.
    Blob(Bytes),
}

impl ResponseBody {
    /// The text, for text bodies.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The value, for JSON bodies.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }

    /// The bytes, for blob bodies.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            ResponseBody::Blob(bytes) => Some(bytes),
            _ => None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ResponseBody::Text(_) => "text",
            ResponseBody::Json(_) => "json",
            ResponseBody::Blob(_) => "blob",
        }
    }
}

/// Outcome of one request. Created per call, never shared.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// HTTP status code.
    pub status: u16,
    /// Label derived from `status`.
    pub message: StatusLabel,
    /// Response headers.
    pub headers: HeaderMap,
    /// Body, decoded per the declared or inferred mode.
    pub data: ResponseBody,
}

impl FetchResult {
    /// Deserialize the JSON body into `T`, validating its shape.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
        match &self.data {
            ResponseBody::Json(value) => Ok(T::deserialize(value)?),
            other => Err(DecodeError::NotJson(other.kind())),
        }
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Decode mode implied by a `Content-Type` header, if any.
///
/// Parameters such as `; charset=utf-8` are ignored.
pub fn infer_response_type(headers: &HeaderMap) -> Option<ResponseType> {
    let content_type = headers.get(CONTENT_TYPE)?.to_str().ok()?;
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match essence.as_str() {
        "application/json" => Some(ResponseType::Json),
        "application/octet-stream" => Some(ResponseType::Blob),
        "text/plain" | "text/html" => Some(ResponseType::Text),
        _ => None,
    }
}

/// Decode `body` with `mode`; without a mode, JSON is attempted.
pub fn decode_body(body: Bytes, mode: Option<ResponseType>) -> Result<ResponseBody, DecodeError> {
    match mode {
        Some(ResponseType::Text) => Ok(ResponseBody::Text(String::from_utf8(body.to_vec())?)),
        Some(ResponseType::Blob) => Ok(ResponseBody::Blob(body)),
        Some(ResponseType::Json) | None => Ok(ResponseBody::Json(serde_json::from_slice(&body)?)),
    }
}

/// Decode the body of a non-2xx response.
///
/// Never fails: a body that does not decode with `mode` (typically an empty
/// body with no `Content-Type`) is kept as text, or as raw bytes when it is
/// not UTF-8.
pub fn decode_error_body(body: Bytes, mode: Option<ResponseType>) -> ResponseBody {
    match decode_body(body.clone(), mode) {
        Ok(data) => data,
        Err(_) => match String::from_utf8(body.to_vec()) {
            Ok(text) => ResponseBody::Text(text),
            Err(_) => ResponseBody::Blob(body),
        },
    }
}
