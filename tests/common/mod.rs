//! Shared helpers for driving the security header layer in tests.

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    routing::get,
    Router,
};
use tower::ServiceExt;

use security_headers::http::SecurityHeadersRouterExt;
use security_headers::{SecurityHeadersConfig, SharedPolicy};

/// The lowercase names of all headers the layer can write.
pub const SECURITY_HEADERS: [&str; 6] = [
    "content-security-policy",
    "x-frame-options",
    "x-content-type-options",
    "x-xss-protection",
    "referrer-policy",
    "permissions-policy",
];

/// A hello-world app behind the layer with the given policy.
pub fn app(config: SecurityHeadersConfig) -> Router {
    Router::new()
        .route("/", get(|| async { "Hello World!" }))
        .use_security_headers(SharedPolicy::new(config))
}

/// Send `GET /` through `app` and return status and headers.
pub async fn get_root(app: Router) -> (StatusCode, HeaderMap) {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    (response.status(), response.headers().clone())
}

/// Headers for a request served with `config`.
pub async fn headers_for(config: SecurityHeadersConfig) -> HeaderMap {
    let (status, headers) = get_root(app(config)).await;
    assert_eq!(status, StatusCode::OK);
    headers
}

/// Value of `name`, if present exactly once.
#[allow(dead_code)]
pub fn single(headers: &HeaderMap, name: &str) -> Option<String> {
    let values: Vec<_> = headers.get_all(name).iter().collect();
    assert!(values.len() <= 1, "{} present {} times", name, values.len());
    values.first().map(|v| v.to_str().unwrap().to_string())
}

/// Security header names in the order they appear in `headers`.
#[allow(dead_code)]
pub fn security_header_order(headers: &HeaderMap) -> Vec<String> {
    headers
        .keys()
        .map(|name| name.as_str().to_string())
        .filter(|name| SECURITY_HEADERS.contains(&name.as_str()))
        .collect()
}
