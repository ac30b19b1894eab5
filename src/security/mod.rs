//! Security header subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → layer.rs (snapshot SharedPolicy)
//!     → headers.rs (emit enabled headers in policy order)
//!     → inner service (handler runs, builds response)
//!     → layer.rs (append pending headers, return response)
//! ```
//!
//! # Design Decisions
//! - Header values are computed before the inner service is called
//! - Recomputed on every request; the policy snapshot is the only input
//! - Fail closed: a value that cannot be sent becomes a 500, never a
//!   malformed header

pub mod headers;
pub mod layer;

pub use headers::{emit_headers, HeaderSink};
pub use layer::{SecurityHeadersLayer, SecurityHeadersService, SharedPolicy};
