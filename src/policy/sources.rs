//! Well-known CSP source expressions.
//!
//! Keyword sources carry their single quotes, as the CSP grammar requires.
//! Nonce and hash sources are assembled by [`nonce`] and [`hash`], which
//! reject blank input instead of producing an unusable token.

use thiserror::Error;

/// The origin the document is served from, including scheme and port.
pub const SELF: &str = "'self'";

/// Allows `eval()` and similar string-to-code APIs.
pub const UNSAFE_EVAL: &str = "'unsafe-eval'";

/// Allows WebAssembly compilation without `'unsafe-eval'`.
pub const WASM_UNSAFE_EVAL: &str = "'wasm-unsafe-eval'";

/// Allows specific inline event handlers.
pub const UNSAFE_HASHES: &str = "'unsafe-hashes'";

/// Allows inline scripts, styles, event handlers and `javascript:` URLs.
pub const UNSAFE_INLINE: &str = "'unsafe-inline'";

/// The empty set; no URL matches.
pub const NONE: &str = "'none'";

/// Propagates trust from a nonce- or hash-approved script to the scripts it loads.
pub const STRICT_DYNAMIC: &str = "'strict-dynamic'";

/// Includes a sample of the violating code in violation reports.
pub const REPORT_SAMPLE: &str = "'report-sample'";

const HASH_ALGORITHMS: [&str; 3] = ["sha256", "sha384", "sha512"];

/// Invalid argument passed to a source constructor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("nonce value must not be empty")]
    EmptyNonce,

    #[error("hash algorithm must not be empty")]
    EmptyAlgorithm,

    #[error("unsupported hash algorithm `{0}`: expected sha256, sha384 or sha512")]
    UnsupportedAlgorithm(String),

    #[error("hash value must not be empty")]
    EmptyHash,
}

/// Build a `'nonce-<value>'` source.
///
/// The value should be an unguessable base64 string generated per response.
pub fn nonce(value: &str) -> Result<String, SourceError> {
    if value.trim().is_empty() {
        return Err(SourceError::EmptyNonce);
    }
    Ok(format!("'nonce-{}'", value))
}

/// Build a `'<algorithm>-<value>'` source from a base64 digest.
pub fn hash(algorithm: &str, value: &str) -> Result<String, SourceError> {
    if algorithm.trim().is_empty() {
        return Err(SourceError::EmptyAlgorithm);
    }
    if !HASH_ALGORITHMS.contains(&algorithm) {
        return Err(SourceError::UnsupportedAlgorithm(algorithm.to_string()));
    }
    if value.trim().is_empty() {
        return Err(SourceError::EmptyHash);
    }
    Ok(format!("'{}-{}'", algorithm, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_are_quoted() {
        for keyword in [
            SELF,
            UNSAFE_EVAL,
            WASM_UNSAFE_EVAL,
            UNSAFE_HASHES,
            UNSAFE_INLINE,
            NONE,
            STRICT_DYNAMIC,
            REPORT_SAMPLE,
        ] {
            assert!(keyword.starts_with('\'') && keyword.ends_with('\''), "{}", keyword);
        }
        assert_eq!(NONE, "'none'");
        assert_eq!(SELF, "'self'");
    }

    #[test]
    fn test_nonce() {
        assert_eq!(nonce("abc123").unwrap(), "'nonce-abc123'");
        assert_eq!(nonce(""), Err(SourceError::EmptyNonce));
        assert_eq!(nonce("   "), Err(SourceError::EmptyNonce));
    }

    #[test]
    fn test_hash() {
        assert_eq!(hash("sha256", "abc").unwrap(), "'sha256-abc'");
        assert_eq!(hash("sha384", "abc").unwrap(), "'sha384-abc'");
        assert_eq!(hash("sha512", "abc").unwrap(), "'sha512-abc'");

        assert_eq!(
            hash("sha1", "x"),
            Err(SourceError::UnsupportedAlgorithm("sha1".into()))
        );
        assert_eq!(
            hash("SHA256", "x"),
            Err(SourceError::UnsupportedAlgorithm("SHA256".into()))
        );
        assert_eq!(hash(" ", "x"), Err(SourceError::EmptyAlgorithm));
        assert_eq!(hash("sha256", ""), Err(SourceError::EmptyHash));
        assert_eq!(hash("sha256", "\t"), Err(SourceError::EmptyHash));
    }
}
