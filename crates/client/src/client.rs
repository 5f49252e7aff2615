//! Client factory and the `request` entry point.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::FetchError;
use crate::interceptor::{Interceptor, Next};
use crate::request::{Method, RequestDescriptor, RequestOptions};
use crate::response::FetchResult;
use crate::transport::{ReqwestTransport, Transport};
use crate::url::normalize_base_url;

/// Builder for [`Client`].
#[derive(Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    interceptor: Option<Arc<dyn Interceptor>>,
    transport: Option<Arc<dyn Transport>>,
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("base_url", &self.base_url)
            .field("interceptor", &self.interceptor.is_some())
            .finish_non_exhaustive()
    }
}

impl ClientBuilder {
    /// Base address for relative templates. One trailing `/` is dropped.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Install the interceptor. A second call replaces the first.
    pub fn interceptor(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptor = Some(Arc::new(interceptor));
        self
    }

    /// Replace the default reqwest transport.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Finish the client. Without a base URL, templates must be absolute.
    pub fn build(self) -> Client {
        let base_url = self
            .base_url
            .as_deref()
            .map(normalize_base_url)
            .unwrap_or_default();
        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(ReqwestTransport::default()));

        Client {
            inner: Arc::new(ClientInner {
                base_url,
                interceptor: self.interceptor,
                transport,
            }),
        }
    }
}

struct ClientInner {
    base_url: String,
    interceptor: Option<Arc<dyn Interceptor>>,
    transport: Arc<dyn Transport>,
}

/// Typed request helper.
///
/// Base address, interceptor and transport are fixed at construction; calls
/// share no mutable state, so a `Client` can be cloned and used concurrently.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url)
            .field("interceptor", &self.inner.interceptor.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Client {
    /// Start configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Client with a base address and the default transport.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::builder().base_url(base_url).build()
    }

    /// Normalized base address.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Issue one request.
    ///
    /// `path` is a template such as `/users/{id}`; params not consumed by a
    /// placeholder are appended as the query string.
    pub async fn request(
        &self,
        path: &str,
        method: Method,
        options: Option<RequestOptions>,
    ) -> Result<FetchResult, FetchError> {
        let descriptor = RequestDescriptor::new(
            &self.inner.base_url,
            path,
            method,
            options.unwrap_or_default(),
        );
        let next = Next::new(self.inner.transport.as_ref());

        match &self.inner.interceptor {
            Some(interceptor) => {
                debug!(path, %method, "Running request through interceptor.");
                interceptor.intercept(descriptor, next).await
            }
            None => next.run(&descriptor).await,
        }
    }

    /// Issue one request and deserialize its JSON body into `T`.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        path: &str,
        method: Method,
        options: Option<RequestOptions>,
    ) -> Result<(FetchResult, T), FetchError> {
        let result = self.request(path, method, options).await?;
        let data = result.json::<T>()?;
        Ok((result, data))
    }
}
