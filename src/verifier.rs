//! Bearer token verification against cache-resolved signing keys
//!
//! The verifier is the consumer of the signing key cache: it parses an
//! inbound RS256 token, resolves the signing key named by the token's `kid`,
//! checks channel endorsements, verifies the signature, and validates the
//! standard claims.

use crate::cache::SigningKeyCache;
use crate::error::{Error, Result};
use crate::limits::{
    MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_DECODED_SIGNATURE_SIZE,
    MAX_TOKEN_LENGTH,
};
use crate::token::{Claims, TokenHeader};
use crate::utils::base64url;
use ring::signature::{UnparsedPublicKey, RSA_PKCS1_2048_8192_SHA256};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Default clock skew tolerance for temporal claims (5 minutes)
pub const DEFAULT_CLOCK_SKEW_SECS: u64 = 300;

/// Validation options for inbound tokens
#[derive(Debug, Clone)]
pub struct VerifyOptions {
    issuers: Vec<String>,
    audience: Option<String>,
    clock_skew_secs: u64,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            issuers: Vec::new(),
            audience: None,
            clock_skew_secs: DEFAULT_CLOCK_SKEW_SECS,
        }
    }
}

impl VerifyOptions {
    /// Create options with defaults: no issuer or audience restriction,
    /// 5 minutes of clock skew
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a trusted issuer; once any issuer is configured, the `iss` claim
    /// must match one of them
    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuers.push(issuer.into());
        self
    }

    /// Require the `aud` claim to equal `audience`
    pub fn audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// Set clock skew tolerance for `exp`/`nbf` checks
    pub fn clock_skew(mut self, seconds: u64) -> Self {
        self.clock_skew_secs = seconds;
        self
    }
}

/// Verifies inbound bearer tokens using a shared signing key cache
pub struct TokenVerifier {
    cache: Arc<SigningKeyCache>,
    options: VerifyOptions,
}

impl TokenVerifier {
    /// Create a verifier with default options
    pub fn new(cache: Arc<SigningKeyCache>) -> Self {
        Self::with_options(cache, VerifyOptions::default())
    }

    /// Create a verifier with explicit options
    pub fn with_options(cache: Arc<SigningKeyCache>, options: VerifyOptions) -> Self {
        Self { cache, options }
    }

    /// Verify a bearer token and return its claims
    ///
    /// When `channel_id` is supplied and the resolved signing key carries a
    /// non-empty endorsement list, the channel must appear in that list.
    pub async fn verify(&self, token: &str, channel_id: Option<&str>) -> Result<Claims> {
        if token.len() > MAX_TOKEN_LENGTH {
            return Err(Error::TokenTooLarge {
                size: token.len(),
                max: MAX_TOKEN_LENGTH,
            });
        }

        let mut parts = token.split('.');
        let header_b64 = parts.next().ok_or(Error::FormatInvalid)?;
        let payload_b64 = parts.next().ok_or(Error::FormatInvalid)?;
        let signature_b64 = parts.next().ok_or(Error::FormatInvalid)?;
        if parts.next().is_some() {
            return Err(Error::FormatInvalid);
        }

        let header_json = base64url::decode_string(header_b64, MAX_DECODED_HEADER_SIZE)?;
        let header: TokenHeader = miniserde::json::from_str(&header_json)
            .map_err(|_| Error::Parse("token: invalid header json".to_string()))?;

        if header.algorithm != "RS256" {
            return Err(Error::AlgorithmUnsupported(header.algorithm));
        }
        let kid = header.key_id.as_deref().ok_or(Error::KeyIdMissing)?;

        let key = self
            .cache
            .resolve(kid)
            .await
            .ok_or_else(|| Error::KeyNotFound(kid.to_string()))?;

        if let Some(channel) = channel_id {
            if !key.endorsements.is_empty()
                && !key.endorsements.iter().any(|endorsed| endorsed == channel)
            {
                return Err(Error::EndorsementMismatch {
                    channel: channel.to_string(),
                });
            }
        }

        let signature = base64url::decode_bytes(signature_b64, MAX_DECODED_SIGNATURE_SIZE)?;
        let signing_input = format!("{header_b64}.{payload_b64}");
        UnparsedPublicKey::new(&RSA_PKCS1_2048_8192_SHA256, &key.key_der)
            .verify(signing_input.as_bytes(), &signature)
            .map_err(|_| Error::SignatureInvalid)?;

        let payload_json = base64url::decode_string(payload_b64, MAX_DECODED_PAYLOAD_SIZE)?;
        let claims: Claims = miniserde::json::from_str(&payload_json)
            .map_err(|_| Error::Parse("token: invalid claims json".to_string()))?;

        self.validate_claims(&claims)?;

        debug!(kid = %kid, issuer = ?claims.issuer, "token verified");
        Ok(claims)
    }

    fn validate_claims(&self, claims: &Claims) -> Result<()> {
        let now = now_unix();
        let skew = self.options.clock_skew_secs;

        if !self.options.issuers.is_empty() {
            match claims.issuer.as_deref() {
                Some(issuer) if self.options.issuers.iter().any(|t| t == issuer) => {}
                Some(issuer) => return Err(Error::IssuerNotTrusted(issuer.to_string())),
                None => return Err(Error::ClaimMissing("iss".to_string())),
            }
        }

        if let Some(expected) = &self.options.audience {
            match claims.audience.as_deref() {
                Some(audience) if audience == expected => {}
                Some(audience) => {
                    return Err(Error::AudienceMismatch {
                        expected: expected.clone(),
                        found: audience.to_string(),
                    });
                }
                None => return Err(Error::ClaimMissing("aud".to_string())),
            }
        }

        if let Some(expiration) = claims.expiration {
            if now > expiration.saturating_add(skew as i64) {
                return Err(Error::TokenExpired {
                    expired_at: expiration,
                    now,
                    skew,
                });
            }
        }

        if let Some(not_before) = claims.not_before {
            if now < not_before.saturating_sub(skew as i64) {
                return Err(Error::TokenNotYetValid {
                    not_before,
                    now,
                    skew,
                });
            }
        }

        Ok(())
    }
}

fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
