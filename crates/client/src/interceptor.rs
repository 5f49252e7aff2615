//! The single interception point around the transport call.
//!
//! A client holds at most one [`Interceptor`]. It receives the populated
//! [`RequestDescriptor`] and a [`Next`] continuation. It may edit the
//! descriptor, skip the continuation, run it several times, or rewrite its
//! result. Several concerns are combined by writing one interceptor that
//! delegates to others.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use tracing::debug;

use crate::error::FetchError;
use crate::request::{RequestBody, RequestDescriptor};
use crate::response::{
    FetchResult, StatusLabel, decode_body, decode_error_body, infer_response_type,
};
use crate::transport::{Transport, TransportBody, TransportRequest};

const CONTENT_TYPE: &str = "Content-Type";
const APPLICATION_JSON: &str = "application/json";

/// Cross-cutting hook around every request of a client.
pub trait Interceptor: Send + Sync {
    /// Handle `request`, usually by editing it and calling
    /// [`Next::run`].
    fn intercept<'a>(
        &'a self,
        request: RequestDescriptor,
        next: Next<'a>,
    ) -> BoxFuture<'a, Result<FetchResult, FetchError>>;
}

impl<I: Interceptor + ?Sized> Interceptor for Arc<I> {
    fn intercept<'a>(
        &'a self,
        request: RequestDescriptor,
        next: Next<'a>,
    ) -> BoxFuture<'a, Result<FetchResult, FetchError>> {
        (**self).intercept(request, next)
    }
}

/// Continuation performing the actual call. Cheap to copy; every
/// [`Next::run`] issues a fresh request.
#[derive(Clone, Copy)]
pub struct Next<'a> {
    transport: &'a dyn Transport,
}

impl std::fmt::Debug for Next<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Next").finish_non_exhaustive()
    }
}

impl<'a> Next<'a> {
    pub(crate) fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Send `request` and decode the response.
    ///
    /// Non-2xx responses become [`FetchError::Http`] carrying the decoded
    /// error body.
    pub async fn run(self, request: &RequestDescriptor) -> Result<FetchResult, FetchError> {
        let transport_request = prepare(request)?;
        let response = self.transport.send(transport_request).await?;

        let status = response.status;
        let message = StatusLabel::from_status(status);
        let success = response.is_success();
        let inferred = infer_response_type(&response.headers);
        // An error status is always reported as such, even if its body
        // cannot be decoded.
        let data = if success {
            decode_body(response.body, request.response_type.or(inferred))?
        } else {
            decode_error_body(response.body, request.error_response_type.or(inferred))
        };
        let result = FetchResult {
            status,
            message,
            headers: response.headers,
            data,
        };

        if success {
            Ok(result)
        } else {
            debug!(status, %message, "Request returned an error status.");
            Err(FetchError::Http(Box::new(result)))
        }
    }
}

/// Turn a descriptor into what goes on the wire.
pub(crate) fn prepare(request: &RequestDescriptor) -> Result<TransportRequest, FetchError> {
    let multipart = request.body.as_ref().is_some_and(RequestBody::is_multipart);

    let mut headers: Vec<(String, String)> = Vec::new();
    if !multipart {
        headers.push((CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string()));
    }
    for (name, value) in &request.headers {
        headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
        headers.push((name.clone(), value.clone()));
    }

    let body = match &request.body {
        Some(RequestBody::Json(value)) => Some(TransportBody::Text(
            serde_json::to_string(value).map_err(FetchError::Encode)?,
        )),
        Some(RequestBody::Multipart(form)) => Some(TransportBody::Multipart(form.clone())),
        None => None,
    };

    Ok(TransportRequest {
        url: request.target(),
        method: request.method,
        headers,
        body,
    })
}
