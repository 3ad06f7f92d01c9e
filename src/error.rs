//! Errors for connector-auth

use thiserror::Error;

/// Errors raised while refreshing signing-key metadata or verifying tokens.
///
/// `SigningKeyCache::resolve` never surfaces these to its caller; refresh
/// failures are logged and absorbed into a "not found" lookup result. They
/// are observable through `SigningKeyCache::refresh` and `TokenVerifier`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Metadata fetching
    // ============================================================================
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("unexpected HTTP status {status}")]
    BadStatus { status: u16 },

    #[error("empty response body")]
    EmptyBody,

    #[error("parse failure: {0}")]
    Parse(String),

    #[error("response too large: {size} bytes (maximum: {max} bytes)")]
    ResponseTooLarge { size: usize, max: usize },

    #[error("URL too long: {length} characters (maximum: {max} characters)")]
    UrlTooLong { length: usize, max: usize },

    #[error("invalid URL: {0}")]
    UrlInvalid(String),

    // ============================================================================
    // Key material
    // ============================================================================
    #[error("key set too large: {key_count} keys (maximum: {max} keys)")]
    KeySetTooLarge { key_count: usize, max: usize },

    #[error("key field '{field}' too large: {size} bytes (maximum: {max} bytes)")]
    KeyFieldTooLarge {
        field: String,
        size: usize,
        max: usize,
    },

    #[error("Base64URL decoding failed: {0}")]
    InvalidBase64(String),

    #[error("key encoding failed: {0}")]
    KeyEncoding(String),

    // ============================================================================
    // Token verification
    // ============================================================================
    #[error("invalid token format: expected three parts separated by '.'")]
    FormatInvalid,

    #[error("token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    #[error("algorithm '{0}' is not supported")]
    AlgorithmUnsupported(String),

    #[error("token header is missing a key id (kid)")]
    KeyIdMissing,

    #[error("no signing key found for kid '{0}'")]
    KeyNotFound(String),

    #[error("signature verification failed")]
    SignatureInvalid,

    #[error("issuer '{0}' is not trusted")]
    IssuerNotTrusted(String),

    #[error("audience mismatch: expected '{expected}', found '{found}'")]
    AudienceMismatch { expected: String, found: String },

    #[error("channel '{channel}' is not endorsed by the signing key")]
    EndorsementMismatch { channel: String },

    #[error("token expired at {expired_at} (now: {now}, skew: {skew}s)")]
    TokenExpired { expired_at: i64, now: i64, skew: u64 },

    #[error("token not valid until {not_before} (now: {now}, skew: {skew}s)")]
    TokenNotYetValid { not_before: i64, now: i64, skew: u64 },

    #[error("required claim '{0}' is missing")]
    ClaimMissing(String),
}

/// Result type alias for connector-auth operations
pub type Result<T> = std::result::Result<T, Error>;
