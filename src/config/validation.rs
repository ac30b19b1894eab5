//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every enabled header renders to a legal HTTP header value
//! - Validate the listener address
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function over the config
//! - Runs before a config is installed, so requests never hit these errors
//! - Questionable but well-defined policies (e.g. `enabled-report` without a
//!   URI) are logged, not corrected

use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::policy::{HeaderKind, SecurityHeadersConfig, XssProtectionValue};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{header} value `{value}` is not a valid HTTP header value")]
    InvalidHeaderValue { header: &'static str, value: String },

    #[error("invalid bind address `{0}`")]
    InvalidBindAddress(String),

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
}

/// Validate a header policy.
pub fn validate_headers(config: &SecurityHeadersConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for kind in HeaderKind::ALL {
        if let Some(value) = config.render(kind) {
            if HeaderValue::from_str(&value).is_err() {
                errors.push(ValidationError::InvalidHeaderValue {
                    header: kind.name(),
                    value,
                });
            }
        }
    }

    if config.xss_protection.enabled
        && config.xss_protection.value == XssProtectionValue::EnabledReport
        && config.xss_protection.reporting_uri.is_none()
    {
        tracing::warn!("X-XSS-Protection is enabled-report without a reporting_uri; sending `1; report=`");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a full application config.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if let Err(header_errors) = validate_headers(&config.headers) {
        errors.extend(header_errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
