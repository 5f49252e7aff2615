//! The network boundary: a request descriptor goes in, a status, headers and
//! body come out.

use std::fmt;

use bytes::Bytes;
use futures_util::future::BoxFuture;
use reqwest::header::HeaderMap;
use tracing::debug;

use crate::error::TransportError;
use crate::request::{FormPart, Method, MultipartForm};

/// Payload as it goes on the wire.
#[derive(Debug, Clone)]
pub enum TransportBody {
    /// Serialized JSON.
    Text(String),
    /// Multipart form, encoded by the transport.
    Multipart(MultipartForm),
}

/// Request after URL construction, header assembly and body serialization.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// Absolute target URL, query string included.
    pub url: String,
    /// HTTP method.
    pub method: Method,
    /// Headers in send order.
    pub headers: Vec<(String, String)>,
    /// Encoded body, if any.
    pub body: Option<TransportBody>,
}

/// Raw response.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HeaderMap,
    /// Undecoded body bytes.
    pub body: Bytes,
}

impl TransportResponse {
    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests. Implementations must only fail when no response arrived.
pub trait Transport: Send + Sync {
    /// Send one request. An `Err` means no response arrived; any status
    /// is an `Ok`.
    fn send(
        &self,
        request: TransportRequest,
    ) -> BoxFuture<'_, Result<TransportResponse, TransportError>>;
}

/// [`Transport`] backed by a shared `reqwest::Client`.
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqwestTransport").finish_non_exhaustive()
    }
}

impl ReqwestTransport {
    /// Wrap an existing client, keeping its pool and settings.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn to_reqwest_form(form: MultipartForm) -> Result<reqwest::multipart::Form, TransportError> {
    let mut out = reqwest::multipart::Form::new();
    for part in form.parts() {
        out = match part {
            FormPart::Text { name, value } => out.text(name.clone(), value.clone()),
            FormPart::Bytes {
                name,
                data,
                file_name,
                mime,
            } => {
                let mut p = reqwest::multipart::Part::bytes(data.to_vec());
                if let Some(file_name) = file_name {
                    p = p.file_name(file_name.clone());
                }
                if let Some(mime) = mime {
                    p = p
                        .mime_str(mime)
                        .map_err(|err| TransportError::new(format!("invalid part mime: {err}")))?;
                }
                out.part(name.clone(), p)
            }
        };
    }
    Ok(out)
}

impl Transport for ReqwestTransport {
    fn send(
        &self,
        request: TransportRequest,
    ) -> BoxFuture<'_, Result<TransportResponse, TransportError>> {
        Box::pin(async move {
            let TransportRequest {
                url,
                method,
                headers,
                body,
            } = request;

            let mut builder = self.client.request(method.to_reqwest(), &url);
            for (name, value) in &headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            builder = match body {
                Some(TransportBody::Text(text)) => builder.body(text),
                Some(TransportBody::Multipart(form)) => builder.multipart(to_reqwest_form(form)?),
                None => builder,
            };

            debug!(%url, %method, "Sending request.");
            let response = builder.send().await.map_err(|err| {
                debug!(error = %err, %url, "Request failed before a response arrived.");
                TransportError::from(err)
            })?;

            let status = response.status().as_u16();
            let headers = response.headers().clone();
            let body = response.bytes().await?;
            debug!(status, %url, body_len = body.len(), "Received response.");

            Ok(TransportResponse {
                status,
                headers,
                body,
            })
        })
    }
}
