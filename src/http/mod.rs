//! HTTP integration.
//!
//! # Data Flow
//! ```text
//! add_security_headers(closure)     AppConfig.headers
//!     → SharedPolicy (validated, frozen)
//!     → Router::use_security_headers
//!     → TraceLayer → SecurityHeadersLayer → TimeoutLayer → handler
//! ```

pub mod server;

pub use server::{add_security_headers, HttpServer, SecurityHeadersRouterExt};
