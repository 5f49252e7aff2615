//! Request pipeline errors.

use thiserror::Error;

use crate::response::FetchResult;

/// No response was received: DNS, connect, TLS or I/O failure.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TransportError {
    /// Underlying failure, as reported by the transport.
    pub message: String,
}

impl TransportError {
    /// Error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// A response body could not be decoded with the chosen mode.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body is not well-formed JSON, or does not fit the target type.
    #[error("invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),

    /// Text mode was requested for a non-UTF-8 body.
    #[error("body is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// [`FetchResult::json`] was called on a text or blob body.
    #[error("expected a JSON body, got {0}")]
    NotJson(&'static str),
}

/// Failure of a [`Client::request`](crate::Client::request) call.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No response arrived.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Response received with a non-2xx status. Carries the decoded error body.
    #[error("HTTP {} {}", .0.status, .0.message)]
    Http(Box<FetchResult>),

    /// A 2xx response whose body does not decode with the chosen mode.
    #[error("failed to decode response: {0}")]
    Decode(#[from] DecodeError),

    /// The JSON request body could not be serialized.
    #[error("failed to serialize request body: {0}")]
    Encode(#[source] serde_json::Error),
}

impl FetchError {
    /// True when the request never produced a response.
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport(_))
    }

    /// HTTP status, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http(result) => Some(result.status),
            _ => None,
        }
    }

    /// The error response, for HTTP failures.
    pub fn result(&self) -> Option<&FetchResult> {
        match self {
            FetchError::Http(result) => Some(result),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::response::{ResponseBody, StatusLabel};

    #[test]
    fn test_http_error_exposes_result() {
        let err = FetchError::Http(Box::new(FetchResult {
            status: 404,
            message: StatusLabel::NotFound,
            headers: reqwest::header::HeaderMap::new(),
            data: ResponseBody::Text("missing".into()),
        }));
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_transport());
        assert_eq!(err.to_string(), "HTTP 404 NotFound");
        assert_eq!(err.result().unwrap().data.as_text(), Some("missing"));
    }

    #[test]
    fn test_transport_error_has_no_status() {
        let err = FetchError::from(TransportError::new("connection refused"));
        assert!(err.is_transport());
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "transport error: connection refused");
    }
}
