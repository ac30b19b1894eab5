//! Fixed-vocabulary header values and the single-value header configurations.
//!
//! Each enum maps to exactly one wire token. The mappings are exhaustive
//! `match` expressions, so a variant without a token does not compile.

use serde::{Deserialize, Serialize};
use url::Url;

/// Value of the `X-Frame-Options` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrameOptionsValue {
    /// The page cannot be displayed in a frame.
    #[default]
    Deny,
    /// The page can only be framed by documents of the same origin.
    SameOrigin,
}

impl FrameOptionsValue {
    pub fn as_str(self) -> &'static str {
        match self {
            FrameOptionsValue::Deny => "DENY",
            FrameOptionsValue::SameOrigin => "SAMEORIGIN",
        }
    }
}

/// Value of the `X-XSS-Protection` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum XssProtectionValue {
    /// Disables XSS filtering.
    Disabled,
    /// Enables filtering; the browser sanitizes the page.
    Enabled,
    /// Enables filtering and blocks rendering instead of sanitizing.
    #[default]
    EnabledBlock,
    /// Enables filtering and reports violations to the reporting URI.
    EnabledReport,
}

/// Value of the `Referrer-Policy` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferrerPolicyValue {
    NoReferrer,
    NoReferrerWhenDowngrade,
    Origin,
    OriginWhenCrossOrigin,
    SameOrigin,
    StrictOrigin,
    #[default]
    StrictOriginWhenCrossOrigin,
    UnsafeUrl,
}

impl ReferrerPolicyValue {
    pub fn as_str(self) -> &'static str {
        match self {
            ReferrerPolicyValue::NoReferrer => "no-referrer",
            ReferrerPolicyValue::NoReferrerWhenDowngrade => "no-referrer-when-downgrade",
            ReferrerPolicyValue::Origin => "origin",
            ReferrerPolicyValue::OriginWhenCrossOrigin => "origin-when-cross-origin",
            ReferrerPolicyValue::SameOrigin => "same-origin",
            ReferrerPolicyValue::StrictOrigin => "strict-origin",
            ReferrerPolicyValue::StrictOriginWhenCrossOrigin => "strict-origin-when-cross-origin",
            ReferrerPolicyValue::UnsafeUrl => "unsafe-url",
        }
    }
}

/// Coarse mode of a Permissions-Policy allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AllowListValue {
    /// Allowed everywhere, including cross-origin frames.
    All,
    /// Allowed in this document and same-origin frames.
    #[serde(rename = "self")]
    SelfOrigin,
    /// Allowed in a frame whose document matches the frame's `src` origin.
    Src,
    /// Disabled in all browsing contexts.
    None,
}

/// `X-Frame-Options` configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FrameOptionsConfig {
    pub enabled: bool,
    pub value: FrameOptionsValue,
}

impl Default for FrameOptionsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            value: FrameOptionsValue::default(),
        }
    }
}

/// `X-Content-Type-Options` configuration. The only value is `nosniff`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContentTypeOptionsConfig {
    pub enabled: bool,
}

impl Default for ContentTypeOptionsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// `X-XSS-Protection` configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct XssProtectionConfig {
    pub enabled: bool,
    pub value: XssProtectionValue,

    /// Only read when `value` is [`XssProtectionValue::EnabledReport`].
    pub reporting_uri: Option<Url>,
}

impl Default for XssProtectionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            value: XssProtectionValue::default(),
            reporting_uri: None,
        }
    }
}

/// `Referrer-Policy` configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReferrerPolicyConfig {
    pub enabled: bool,
    pub value: ReferrerPolicyValue,
}

impl Default for ReferrerPolicyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            value: ReferrerPolicyValue::default(),
        }
    }
}
