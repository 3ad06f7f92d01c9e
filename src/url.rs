//! URL validation utilities
//!
//! Validates the construction-time metadata URL and the JWKS URI discovered
//! at refresh time. Both checks enforce length bounds and structural
//! requirements before any fetch is attempted.

use crate::error::{Error, Result};
use crate::limits::{MAX_JWKS_URI_LENGTH, MAX_METADATA_URL_LENGTH};

/// Common URL validation logic
fn validate_url_common(input: &str, max_length: usize, name: &str) -> Result<url::Url> {
    if input.trim().is_empty() {
        return Err(Error::UrlInvalid(format!("{name} cannot be empty")));
    }

    if input.len() > max_length {
        return Err(Error::UrlTooLong {
            length: input.len(),
            max: max_length,
        });
    }

    let parsed = input
        .parse::<url::Url>()
        .map_err(|e| Error::UrlInvalid(format!("invalid {name}: {e}")))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(Error::UrlInvalid(format!(
            "{name} must use http or https scheme"
        )));
    }

    if parsed.host_str().is_none() {
        return Err(Error::UrlInvalid(format!("{name} must have a valid host")));
    }

    Ok(parsed)
}

/// Validate the metadata (discovery document) URL format and size
pub(crate) fn validate_metadata_url(input: &str) -> Result<()> {
    validate_url_common(input, MAX_METADATA_URL_LENGTH, "metadata URL")?;
    Ok(())
}

/// Validate a JWKS URI format and size
pub(crate) fn validate_jwks_uri(uri: &str) -> Result<()> {
    validate_url_common(uri, MAX_JWKS_URI_LENGTH, "JWKS URI")?;
    Ok(())
}
