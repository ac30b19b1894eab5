//! Header value serialization.
//!
//! Pure functions from a header configuration to its exact wire value.
//! Nothing here allocates shared state or looks at `enabled` flags of whole
//! headers; [`header_value`] handles that before any serializer runs.

use std::borrow::Cow;

use crate::policy::csp::ContentSecurityPolicyConfig;
use crate::policy::permissions::{AllowListEntry, PermissionsPolicyConfig};
use crate::policy::slots::Slot;
use crate::policy::values::{
    AllowListValue, ContentTypeOptionsConfig, FrameOptionsConfig, ReferrerPolicyConfig,
    XssProtectionConfig, XssProtectionValue,
};
use crate::policy::{HeaderKind, SecurityHeadersConfig};

pub fn frame_options(config: &FrameOptionsConfig) -> &'static str {
    config.value.as_str()
}

pub fn content_type_options(_config: &ContentTypeOptionsConfig) -> &'static str {
    "nosniff"
}

/// `EnabledReport` without a reporting URI renders `1; report=`.
pub fn xss_protection(config: &XssProtectionConfig) -> Cow<'static, str> {
    match config.value {
        XssProtectionValue::Disabled => Cow::Borrowed("0"),
        XssProtectionValue::Enabled => Cow::Borrowed("1"),
        XssProtectionValue::EnabledBlock => Cow::Borrowed("1; mode=block"),
        XssProtectionValue::EnabledReport => {
            let uri = config.reporting_uri.as_ref().map(|u| u.as_str()).unwrap_or("");
            Cow::Owned(format!("1; report={}", uri))
        }
    }
}

pub fn referrer_policy(config: &ReferrerPolicyConfig) -> &'static str {
    config.value.as_str()
}

/// Render `<token>=<allowlist>` for one feature.
pub fn allow_list(token: &str, entry: &AllowListEntry) -> String {
    let allow_list = match entry.value {
        AllowListValue::All => "*".to_string(),
        AllowListValue::SelfOrigin => format!("(self{})", origins_suffix(&entry.origins)),
        AllowListValue::Src => format!("(src{})", origins_suffix(&entry.origins)),
        AllowListValue::None => "()".to_string(),
    };
    format!("{}={}", token, allow_list)
}

fn origins_suffix(origins: &[String]) -> String {
    origins
        .iter()
        .map(|origin| format!(" \"{}\"", origin))
        .collect()
}

/// Enabled features in canonical order, joined by `, `.
///
/// Empty when no feature is enabled.
pub fn permissions_policy(config: &PermissionsPolicyConfig) -> String {
    config
        .features
        .iter()
        .filter(|(_, entry)| entry.enabled)
        .map(|(feature, entry)| allow_list(feature.token(), entry))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Enabled, non-empty directives in canonical order as `<name> <sources>; `,
/// with the trailing whitespace of the whole value trimmed.
pub fn content_security_policy(config: &ContentSecurityPolicyConfig) -> String {
    let mut value = String::new();

    for (directive, entry) in config.directives.iter() {
        if !entry.enabled || entry.sources.is_empty() {
            continue;
        }
        value.push_str(directive.token());
        value.push(' ');
        value.push_str(entry.sources.join(" ").trim_end());
        value.push_str("; ");
    }

    let trimmed = value.trim_end().len();
    value.truncate(trimmed);
    value
}

/// Value to emit for `kind`, or `None` when the header is disabled or its
/// value came out empty.
pub fn header_value(config: &SecurityHeadersConfig, kind: HeaderKind) -> Option<String> {
    if !config.is_enabled(kind) {
        return None;
    }

    let value = match kind {
        HeaderKind::ContentSecurityPolicy => content_security_policy(&config.content_security_policy),
        HeaderKind::FrameOptions => frame_options(&config.frame_options).to_string(),
        HeaderKind::ContentTypeOptions => content_type_options(&config.content_type_options).to_string(),
        HeaderKind::XssProtection => xss_protection(&config.xss_protection).into_owned(),
        HeaderKind::ReferrerPolicy => referrer_policy(&config.referrer_policy).to_string(),
        HeaderKind::PermissionsPolicy => permissions_policy(&config.permissions_policy),
    };

    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
