//! Security header policy.
//!
//! # Data Flow
//! ```text
//! SecurityHeadersConfig (built once: defaults → TOML / closure → validated)
//!     → render.rs (one pure serializer per header)
//!     → Option<String> per HeaderKind
//!     → security::headers (emission stage)
//! ```
//!
//! # Design Decisions
//! - Every header is a typed configuration, never a hand-written string
//! - Composite headers (Permissions-Policy, CSP) are slot maps iterated in an
//!   explicit canonical order, see `slots.rs`
//! - Header emission order is part of the policy (`EmissionOrder`)

pub mod csp;
pub mod permissions;
pub mod render;
pub mod slots;
pub mod sources;
pub mod values;

use axum::http::header::{self, HeaderName};
use serde::{Deserialize, Serialize};

pub use csp::{ContentSecurityPolicyConfig, CspDirective, FetchDirectiveEntry};
pub use permissions::{AllowListEntry, PermissionsFeature, PermissionsPolicyConfig};
pub use slots::{Slot, SlotMap};
pub use sources::SourceError;
pub use values::{
    AllowListValue, ContentTypeOptionsConfig, FrameOptionsConfig, FrameOptionsValue,
    ReferrerPolicyConfig, ReferrerPolicyValue, XssProtectionConfig, XssProtectionValue,
};

/// The six headers this crate can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderKind {
    ContentSecurityPolicy,
    FrameOptions,
    ContentTypeOptions,
    XssProtection,
    ReferrerPolicy,
    PermissionsPolicy,
}

impl HeaderKind {
    pub const ALL: [HeaderKind; 6] = [
        HeaderKind::ContentSecurityPolicy,
        HeaderKind::FrameOptions,
        HeaderKind::ContentTypeOptions,
        HeaderKind::XssProtection,
        HeaderKind::ReferrerPolicy,
        HeaderKind::PermissionsPolicy,
    ];

    /// Canonical header name as written on the wire.
    pub fn name(self) -> &'static str {
        match self {
            HeaderKind::ContentSecurityPolicy => "Content-Security-Policy",
            HeaderKind::FrameOptions => "X-Frame-Options",
            HeaderKind::ContentTypeOptions => "X-Content-Type-Options",
            HeaderKind::XssProtection => "X-XSS-Protection",
            HeaderKind::ReferrerPolicy => "Referrer-Policy",
            HeaderKind::PermissionsPolicy => "Permissions-Policy",
        }
    }

    pub fn header_name(self) -> HeaderName {
        match self {
            HeaderKind::ContentSecurityPolicy => header::CONTENT_SECURITY_POLICY,
            HeaderKind::FrameOptions => header::X_FRAME_OPTIONS,
            HeaderKind::ContentTypeOptions => header::X_CONTENT_TYPE_OPTIONS,
            HeaderKind::XssProtection => header::X_XSS_PROTECTION,
            HeaderKind::ReferrerPolicy => header::REFERRER_POLICY,
            HeaderKind::PermissionsPolicy => HeaderName::from_static("permissions-policy"),
        }
    }
}

/// Order in which enabled headers are written to a response.
///
/// Browsers do not care; intermediaries that cache or log raw header blocks
/// might, so both historical orders are kept selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmissionOrder {
    /// Content-Security-Policy first, then the single-value headers.
    #[default]
    Current,
    /// Single-value headers, Permissions-Policy, then Content-Security-Policy.
    Legacy,
}

impl EmissionOrder {
    pub fn sequence(self) -> &'static [HeaderKind] {
        match self {
            EmissionOrder::Current => &[
                HeaderKind::ContentSecurityPolicy,
                HeaderKind::FrameOptions,
                HeaderKind::ContentTypeOptions,
                HeaderKind::XssProtection,
                HeaderKind::ReferrerPolicy,
                HeaderKind::PermissionsPolicy,
            ],
            EmissionOrder::Legacy => &[
                HeaderKind::FrameOptions,
                HeaderKind::ContentTypeOptions,
                HeaderKind::XssProtection,
                HeaderKind::ReferrerPolicy,
                HeaderKind::PermissionsPolicy,
                HeaderKind::ContentSecurityPolicy,
            ],
        }
    }
}

/// Root policy: one configuration per header plus the emission order.
///
/// Read-only once installed; requests only ever see an immutable snapshot.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityHeadersConfig {
    pub order: EmissionOrder,
    pub content_security_policy: ContentSecurityPolicyConfig,
    pub frame_options: FrameOptionsConfig,
    pub content_type_options: ContentTypeOptionsConfig,
    pub xss_protection: XssProtectionConfig,
    pub referrer_policy: ReferrerPolicyConfig,
    pub permissions_policy: PermissionsPolicyConfig,
}

impl SecurityHeadersConfig {
    pub fn is_enabled(&self, kind: HeaderKind) -> bool {
        match kind {
            HeaderKind::ContentSecurityPolicy => self.content_security_policy.enabled,
            HeaderKind::FrameOptions => self.frame_options.enabled,
            HeaderKind::ContentTypeOptions => self.content_type_options.enabled,
            HeaderKind::XssProtection => self.xss_protection.enabled,
            HeaderKind::ReferrerPolicy => self.referrer_policy.enabled,
            HeaderKind::PermissionsPolicy => self.permissions_policy.enabled,
        }
    }

    /// See [`render::header_value`].
    pub fn render(&self, kind: HeaderKind) -> Option<String> {
        render::header_value(self, kind)
    }
}
