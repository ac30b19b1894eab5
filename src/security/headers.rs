//! Security header emission stage.
//!
//! # Responsibilities
//! - Walk the policy's emission order once per request
//! - Skip disabled headers without invoking their serializer
//! - Skip headers whose rendered value is empty
//! - Hand each remaining name/value pair to a sink, in order
//!
//! # Design Decisions
//! - Stateless: the policy is the only input and is never mutated
//! - The sink is a trait so the stage is testable without an HTTP stack

use crate::policy::{HeaderKind, SecurityHeadersConfig};

/// Receiver for emitted headers, in emission order.
pub trait HeaderSink {
    fn add_header(&mut self, kind: HeaderKind, value: String);
}

impl HeaderSink for Vec<(HeaderKind, String)> {
    fn add_header(&mut self, kind: HeaderKind, value: String) {
        self.push((kind, value));
    }
}

/// Emit every enabled, non-empty header of `config` into `sink`.
pub fn emit_headers<S>(config: &SecurityHeadersConfig, sink: &mut S)
where
    S: HeaderSink + ?Sized,
{
    for kind in config.order.sequence() {
        if let Some(value) = config.render(*kind) {
            tracing::trace!(header = kind.name(), value = %value, "Emitting security header");
            sink.add_header(*kind, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{EmissionOrder, PermissionsFeature};

    fn emitted(config: &SecurityHeadersConfig) -> Vec<(HeaderKind, String)> {
        let mut sink = Vec::new();
        emit_headers(config, &mut sink);
        sink
    }

    #[test]
    fn test_default_policy() {
        let headers = emitted(&SecurityHeadersConfig::default());
        assert_eq!(
            headers,
            vec![
                (HeaderKind::ContentSecurityPolicy, "default-src 'none';".to_string()),
                (HeaderKind::FrameOptions, "DENY".to_string()),
                (HeaderKind::ContentTypeOptions, "nosniff".to_string()),
                (HeaderKind::XssProtection, "1; mode=block".to_string()),
                (HeaderKind::ReferrerPolicy, "strict-origin-when-cross-origin".to_string()),
            ]
        );
    }

    #[test]
    fn test_legacy_order() {
        let mut config = SecurityHeadersConfig::default();
        config.order = EmissionOrder::Legacy;
        config.permissions_policy.feature_mut(PermissionsFeature::Camera).enabled = true;

        let kinds: Vec<HeaderKind> = emitted(&config).into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            kinds,
            vec![
                HeaderKind::FrameOptions,
                HeaderKind::ContentTypeOptions,
                HeaderKind::XssProtection,
                HeaderKind::ReferrerPolicy,
                HeaderKind::PermissionsPolicy,
                HeaderKind::ContentSecurityPolicy,
            ]
        );
    }

    #[test]
    fn test_disabled_headers_are_absent() {
        for kind in HeaderKind::ALL {
            let mut config = SecurityHeadersConfig::default();
            config.permissions_policy.feature_mut(PermissionsFeature::Camera).enabled = true;
            match kind {
                HeaderKind::ContentSecurityPolicy => config.content_security_policy.enabled = false,
                HeaderKind::FrameOptions => config.frame_options.enabled = false,
                HeaderKind::ContentTypeOptions => config.content_type_options.enabled = false,
                HeaderKind::XssProtection => config.xss_protection.enabled = false,
                HeaderKind::ReferrerPolicy => config.referrer_policy.enabled = false,
                HeaderKind::PermissionsPolicy => config.permissions_policy.enabled = false,
            }

            let headers = emitted(&config);
            assert_eq!(headers.len(), 5, "{:?}", kind);
            assert!(headers.iter().all(|(k, _)| *k != kind), "{:?}", kind);
        }
    }

    #[test]
    fn test_nothing_enabled_emits_nothing() {
        let mut config = SecurityHeadersConfig::default();
        config.content_security_policy.enabled = false;
        config.frame_options.enabled = false;
        config.content_type_options.enabled = false;
        config.xss_protection.enabled = false;
        config.referrer_policy.enabled = false;
        assert!(emitted(&config).is_empty());
    }
}
