//! End-to-end tests of the request pipeline against a mock HTTP server.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;
use openapi_fetch_client::{
    BoxFuture, Client, FetchError, FetchResult, Interceptor, Method, MultipartForm, Next,
    RequestDescriptor, RequestOptions, ResponseBody, ResponseType, StatusLabel, Transport,
    TransportError, TransportRequest, TransportResponse, params,
};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_get_with_path_and_query_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/7"))
        .and(query_param("verbose", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": 7 })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(format!("{}/", server.uri()));
    let result = client
        .request(
            "/users/{id}",
            Method::Get,
            Some(RequestOptions::new().params(params! { "id" => 7, "verbose" => true })),
        )
        .await
        .unwrap();

    assert_eq!(result.status, 200);
    assert_eq!(result.message, StatusLabel::Success);
    assert_eq!(result.data.as_json().unwrap()["id"], 7);
}

#[tokio::test]
async fn test_absolute_url_ignores_base() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("ok", "text/plain"))
        .mount(&server)
        .await;

    let client = Client::new("http://unused.invalid");
    let result = client
        .request(&format!("{}/health", server.uri()), Method::Get, None)
        .await
        .unwrap();

    assert_eq!(result.data, ResponseBody::Text("ok".to_string()));
}

#[tokio::test]
async fn test_post_sends_json_body_and_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/items"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({ "name": "widget" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(server.uri());
    let (result, created): (FetchResult, serde_json::Value) = client
        .request_json(
            "items",
            Method::Post,
            Some(RequestOptions::new().body(serde_json::json!({ "name": "widget" }))),
        )
        .await
        .unwrap();

    assert_eq!(result.status, 200);
    assert_eq!(created["id"], 1);
}

#[tokio::test]
async fn test_multipart_body_lets_transport_set_boundary() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let form = MultipartForm::new()
        .text("title", "report")
        .file("file", "a.bin", None, Bytes::from_static(b"\x00\x01"));
    let client = Client::new(server.uri());
    client
        .request("/upload", Method::Post, Some(RequestOptions::new().body(form)))
        .await
        .unwrap();

    let received = server.received_requests().await.unwrap();
    let content_type = received[0]
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data; boundary="));
}

#[tokio::test]
async fn test_octet_stream_decodes_as_blob() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/file"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(vec![1u8, 2, 3], "application/octet-stream"),
        )
        .mount(&server)
        .await;

    let result = Client::new(server.uri())
        .request("/file", Method::Get, None)
        .await
        .unwrap();

    assert_eq!(result.data, ResponseBody::Blob(Bytes::from_static(&[1, 2, 3])));
}

#[tokio::test]
async fn test_unknown_content_type_falls_back_to_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/custom"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"ok":true}"#, "application/vnd.custom"),
        )
        .mount(&server)
        .await;

    let result = Client::new(server.uri())
        .request("/custom", Method::Get, None)
        .await
        .unwrap();

    assert_eq!(result.data.as_json().unwrap()["ok"], true);
}

#[tokio::test]
async fn test_declared_response_type_wins_over_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/raw"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "a": 1 })))
        .mount(&server)
        .await;

    let result = Client::new(server.uri())
        .request(
            "/raw",
            Method::Get,
            Some(RequestOptions::new().response_type(ResponseType::Text)),
        )
        .await
        .unwrap();

    assert_eq!(result.data.as_text(), Some(r#"{"a":1}"#));
}

#[tokio::test]
async fn test_error_status_carries_decoded_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({ "detail": "nope" })),
        )
        .mount(&server)
        .await;

    let err = Client::new(server.uri())
        .request("/missing", Method::Get, None)
        .await
        .unwrap_err();

    let result = err.result().unwrap();
    assert_eq!(result.status, 404);
    assert_eq!(result.message, StatusLabel::NotFound);
    assert_eq!(result.data.as_json().unwrap()["detail"], "nope");
}

#[tokio::test]
async fn test_error_response_type_is_honored() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/items/3"))
        .respond_with(ResponseTemplate::new(418).set_body_json(serde_json::json!({ "x": 1 })))
        .mount(&server)
        .await;

    let err = Client::new(server.uri())
        .request(
            "/items/{id}",
            Method::Delete,
            Some(
                RequestOptions::new()
                    .params(params! { "id" => 3 })
                    .error_response_type(ResponseType::Text),
            ),
        )
        .await
        .unwrap_err();

    let result = err.result().unwrap();
    assert_eq!(result.message, StatusLabel::Unknown);
    assert_eq!(result.data.as_text(), Some(r#"{"x":1}"#));
}

#[tokio::test]
async fn test_undecodable_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>", "application/json"))
        .mount(&server)
        .await;

    let err = Client::new(server.uri())
        .request("/broken", Method::Get, None)
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn test_bodyless_error_status_keeps_status_and_label() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/secret"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = Client::new(server.uri())
        .request("/secret", Method::Get, None)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    let result = err.result().unwrap();
    assert_eq!(result.message, StatusLabel::UnAuthorized);
    assert_eq!(result.data.as_text(), Some(""));
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    let client = Client::new("http://127.0.0.1:1");
    let err = client.request("/x", Method::Get, None).await.unwrap_err();

    assert!(err.is_transport());
    assert_eq!(err.status(), None);
}

struct BearerAuth {
    token: String,
}

impl Interceptor for BearerAuth {
    fn intercept<'a>(
        &'a self,
        mut request: RequestDescriptor,
        next: Next<'a>,
    ) -> BoxFuture<'a, Result<FetchResult, FetchError>> {
        Box::pin(async move {
            request
                .headers
                .insert("Authorization".to_string(), format!("Bearer {}", self.token));
            next.run(&request).await
        })
    }
}

#[tokio::test]
async fn test_interceptor_can_add_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "me": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::builder()
        .base_url(server.uri())
        .interceptor(BearerAuth {
            token: "secret".to_string(),
        })
        .build();

    let result = client.request("/me", Method::Get, None).await.unwrap();
    assert_eq!(result.status, 200);
}

struct RetryServerErrors {
    attempts: Arc<AtomicUsize>,
}

impl Interceptor for RetryServerErrors {
    fn intercept<'a>(
        &'a self,
        request: RequestDescriptor,
        next: Next<'a>,
    ) -> BoxFuture<'a, Result<FetchResult, FetchError>> {
        Box::pin(async move {
            loop {
                let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
                match next.run(&request).await {
                    Err(FetchError::Http(result)) if result.status >= 500 && attempt < 3 => {}
                    other => return other,
                }
            }
        })
    }
}

#[tokio::test]
async fn test_interceptor_can_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(500).set_body_raw("boom", "text/plain"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })))
        .mount(&server)
        .await;

    let attempts = Arc::new(AtomicUsize::new(0));
    let client = Client::builder()
        .base_url(server.uri())
        .interceptor(RetryServerErrors {
            attempts: Arc::clone(&attempts),
        })
        .build();

    let result = client.request("/flaky", Method::Get, None).await.unwrap();
    assert_eq!(result.status, 200);
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

struct Cached;

impl Interceptor for Cached {
    fn intercept<'a>(
        &'a self,
        _request: RequestDescriptor,
        _next: Next<'a>,
    ) -> BoxFuture<'a, Result<FetchResult, FetchError>> {
        Box::pin(async move {
            Ok(FetchResult {
                status: 200,
                message: StatusLabel::Success,
                headers: HeaderMap::new(),
                data: ResponseBody::Text("cached".to_string()),
            })
        })
    }
}

#[tokio::test]
async fn test_interceptor_can_short_circuit() {
    let client = Client::builder()
        .base_url("http://127.0.0.1:1")
        .interceptor(Cached)
        .build();

    let result = client.request("/anything", Method::Get, None).await.unwrap();
    assert_eq!(result.data.as_text(), Some("cached"));
}

/// Replies with the requested URL, without touching the network.
struct EchoTransport;

impl Transport for EchoTransport {
    fn send(
        &self,
        request: TransportRequest,
    ) -> BoxFuture<'_, Result<TransportResponse, TransportError>> {
        Box::pin(async move {
            let mut headers = HeaderMap::new();
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
            Ok(TransportResponse {
                status: 200,
                headers,
                body: Bytes::from(request.url),
            })
        })
    }
}

#[tokio::test]
async fn test_concurrent_calls_are_independent() {
    let client = Client::builder()
        .base_url("https://api.example.com")
        .transport(EchoTransport)
        .build();

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move {
                client
                    .request(
                        "/items/{id}",
                        Method::Get,
                        Some(RequestOptions::new().params(params! { "id" => i })),
                    )
                    .await
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let result = handle.await.unwrap().unwrap();
        assert_eq!(
            result.data.as_text().unwrap(),
            format!("https://api.example.com/items/{i}")
        );
    }
}
