//! Typed HTTP request helper.
//!
//! A request flows through:
//! 1. URL construction: template placeholders are filled from params and the
//!    leftover params become the query string ([`url`], [`template`])
//! 2. The optional [`Interceptor`], wrapping the continuation
//! 3. The [`Transport`] call
//! 4. Response decoding, either declared or inferred from `Content-Type`
//!
//! ```no_run
//! use openapi_fetch_client::{Client, Method, RequestOptions, params};
//!
//! # async fn demo() -> Result<(), openapi_fetch_client::FetchError> {
//! let client = Client::new("https://api.example.com/");
//! let result = client
//!     .request(
//!         "/users/{id}",
//!         Method::Get,
//!         Some(RequestOptions::new().params(params! { "id" => 7, "verbose" => true })),
//!     )
//!     .await?;
//! println!("{} {}", result.status, result.message);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod interceptor;
mod request;
mod response;
pub mod template;
mod transport;
pub mod url;

pub use client::{Client, ClientBuilder};
pub use error::{DecodeError, FetchError, TransportError};
pub use interceptor::{Interceptor, Next};
pub use request::{
    FormPart, Method, MultipartForm, ParamValue, Params, RequestBody, RequestDescriptor,
    RequestOptions, ResponseType,
};
pub use response::{
    FetchResult, ResponseBody, StatusLabel, decode_body, decode_error_body, infer_response_type,
};
pub use transport::{
    ReqwestTransport, Transport, TransportBody, TransportRequest, TransportResponse,
};

pub use futures_util::future::BoxFuture;
