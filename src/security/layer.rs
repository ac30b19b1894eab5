//! Tower middleware applying the security header policy to every response.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use arc_swap::ArcSwap;
use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use tower::{Layer, Service};

use crate::policy::{HeaderKind, SecurityHeadersConfig};
use crate::security::headers::{emit_headers, HeaderSink};

/// Policy shared between the middleware and whoever installs new versions.
///
/// Each request takes one snapshot; a reload swaps the whole policy
/// atomically and never mutates a snapshot in use.
#[derive(Debug, Clone)]
pub struct SharedPolicy {
    inner: Arc<ArcSwap<SecurityHeadersConfig>>,
}

impl SharedPolicy {
    pub fn new(config: SecurityHeadersConfig) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(config)),
        }
    }

    /// Current policy snapshot.
    pub fn snapshot(&self) -> Arc<SecurityHeadersConfig> {
        self.inner.load_full()
    }

    /// Install a new policy for subsequent requests.
    pub fn replace(&self, config: SecurityHeadersConfig) {
        self.inner.store(Arc::new(config));
    }
}

impl Default for SharedPolicy {
    fn default() -> Self {
        Self::new(SecurityHeadersConfig::default())
    }
}

/// Headers computed for one response, converted to their HTTP types.
#[derive(Debug, Default)]
pub struct PendingHeaders {
    headers: Vec<(HeaderName, HeaderValue)>,
    invalid: Option<HeaderKind>,
}

impl PendingHeaders {
    pub fn from_policy(config: &SecurityHeadersConfig) -> Self {
        let mut pending = Self::default();
        emit_headers(config, &mut pending);
        pending
    }

    /// First header whose value was not a legal header value, if any.
    pub fn invalid(&self) -> Option<HeaderKind> {
        self.invalid
    }

    /// Append the headers to `response` in emission order.
    ///
    /// Values already set by inner handlers are kept; nothing is merged.
    pub fn apply<B>(self, response: &mut axum::http::Response<B>) {
        let headers = response.headers_mut();
        for (name, value) in self.headers {
            headers.append(name, value);
        }
    }
}

impl HeaderSink for PendingHeaders {
    fn add_header(&mut self, kind: HeaderKind, value: String) {
        match HeaderValue::from_str(&value) {
            Ok(value) => self.headers.push((kind.header_name(), value)),
            Err(_) => {
                self.invalid.get_or_insert(kind);
            }
        }
    }
}

/// Layer that wraps services with [`SecurityHeadersService`].
#[derive(Debug, Clone, Default)]
pub struct SecurityHeadersLayer {
    policy: SharedPolicy,
}

impl SecurityHeadersLayer {
    pub fn new(policy: SharedPolicy) -> Self {
        Self { policy }
    }
}

impl<S> Layer<S> for SecurityHeadersLayer {
    type Service = SecurityHeadersService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SecurityHeadersService {
            inner,
            policy: self.policy.clone(),
        }
    }
}

/// Computes the policy's headers before delegating, then attaches them to
/// the inner response before its body is streamed.
#[derive(Debug, Clone)]
pub struct SecurityHeadersService<S> {
    inner: S,
    policy: SharedPolicy,
}

impl<S> Service<Request> for SecurityHeadersService<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let pending = PendingHeaders::from_policy(&self.policy.snapshot());

        if let Some(kind) = pending.invalid() {
            tracing::error!(
                header = kind.name(),
                "Security header value is not a valid HTTP header value"
            );
            return Box::pin(async {
                Ok::<_, S::Error>(StatusCode::INTERNAL_SERVER_ERROR.into_response())
            });
        }

        let future = self.inner.call(request);
        Box::pin(async move {
            let mut response = future.await?;
            pending.apply(&mut response);
            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PermissionsFeature;

    #[test]
    fn test_pending_headers_default_policy() {
        let pending = PendingHeaders::from_policy(&SecurityHeadersConfig::default());
        assert!(pending.invalid().is_none());

        let mut response = Response::new(axum::body::Body::empty());
        pending.apply(&mut response);
        let headers = response.headers();
        assert_eq!(headers["content-security-policy"], "default-src 'none';");
        assert_eq!(headers["x-frame-options"], "DENY");
        assert!(!headers.contains_key("permissions-policy"));
    }

    #[test]
    fn test_pending_headers_rejects_control_characters() {
        let mut config = SecurityHeadersConfig::default();
        let camera = config.permissions_policy.feature_mut(PermissionsFeature::Camera);
        camera.enabled = true;
        camera.origins.push("https://evil.example\r\nSet-Cookie: a=b".into());

        let pending = PendingHeaders::from_policy(&config);
        assert_eq!(pending.invalid(), Some(HeaderKind::PermissionsPolicy));
    }

    #[test]
    fn test_shared_policy_replace() {
        let policy = SharedPolicy::default();
        let before = policy.snapshot();

        let mut next = SecurityHeadersConfig::default();
        next.frame_options.enabled = false;
        policy.replace(next);

        assert!(before.frame_options.enabled);
        assert!(!policy.snapshot().frame_options.enabled);
    }
}
