//! Typed HTTP security response headers for axum / tower services.
//!
//! A [`SecurityHeadersConfig`] describes Content-Security-Policy,
//! X-Frame-Options, X-Content-Type-Options, X-XSS-Protection,
//! Referrer-Policy and Permissions-Policy as typed values. The
//! [`SecurityHeadersLayer`] renders the enabled headers on every request and
//! attaches them to the response.
//!
//! ```no_run
//! use axum::{routing::get, Router};
//! use security_headers::http::{add_security_headers, SecurityHeadersRouterExt};
//! use security_headers::policy::{sources, CspDirective, FetchDirectiveEntry};
//!
//! # fn build() -> Result<Router, security_headers::config::ConfigError> {
//! let policy = add_security_headers(|config| {
//!     config.content_security_policy.directives.set(
//!         CspDirective::ScriptSrc,
//!         FetchDirectiveEntry::with_sources([sources::SELF.to_string(), sources::nonce("abc123")?]),
//!     );
//!     Ok(())
//! })?;
//!
//! let app = Router::new()
//!     .route("/", get(|| async { "Hello World!" }))
//!     .use_security_headers(policy);
//! # Ok(app)
//! # }
//! ```

pub mod config;
pub mod http;
pub mod observability;
pub mod policy;
pub mod security;

pub use config::AppConfig;
pub use http::HttpServer;
pub use policy::SecurityHeadersConfig;
pub use security::{SecurityHeadersLayer, SharedPolicy};
