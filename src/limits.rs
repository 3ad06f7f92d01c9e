//! Size limit constants for input validation

/// Maximum length for the metadata (discovery document) URL (2048 characters)
pub(crate) const MAX_METADATA_URL_LENGTH: usize = 2048;

/// Maximum length for JWKS URIs (2048 characters)
pub(crate) const MAX_JWKS_URI_LENGTH: usize = 2048;

/// Maximum size for a discovery document response (64KB)
pub(crate) const MAX_DISCOVERY_RESPONSE_SIZE: usize = 64 * 1024;

/// Maximum size for a JWK set response (512KB)
pub(crate) const MAX_JWKS_RESPONSE_SIZE: usize = 512 * 1024;

/// Maximum number of keys in a JWK set (100 keys)
pub(crate) const MAX_KEY_SET_SIZE: usize = 100;

// ============================================================================
// JWK field size limits
// ============================================================================

/// Maximum size for the Base64URL-encoded RSA modulus (n) field (12KB)
/// An 8192-byte modulus (65536 bits) encodes to ~10.9KB Base64URL
pub(crate) const MAX_MODULUS_B64_SIZE: usize = 12 * 1024;

/// Maximum size for the Base64URL-encoded RSA exponent (e) field (64 bytes)
/// The standard exponent 65537 (0x010001) encodes to 4 bytes
pub(crate) const MAX_EXPONENT_B64_SIZE: usize = 64;

// ============================================================================
// Token size limits
// ============================================================================

/// Maximum length for a bearer token string (64KB)
pub(crate) const MAX_TOKEN_LENGTH: usize = 64 * 1024;

/// Maximum size for the decoded token header JSON (8KB)
pub(crate) const MAX_DECODED_HEADER_SIZE: usize = 8 * 1024;

/// Maximum size for the decoded token claims JSON (64KB)
pub(crate) const MAX_DECODED_PAYLOAD_SIZE: usize = 64 * 1024;

/// Maximum size for decoded signature bytes (1KB)
/// RSA signatures are 256-512 bytes for practical key sizes
pub(crate) const MAX_DECODED_SIGNATURE_SIZE: usize = 1024;
