//! Key material conversion
//!
//! Converts the RSA component pair published in a JWK entry into the
//! public-key form the signature backend consumes. The conversion seam is a
//! trait so callers can substitute alternate key representations; the
//! default produces a DER-encoded RSAPublicKey for `ring`.

use crate::error::{Error, Result};
use crate::limits::{MAX_EXPONENT_B64_SIZE, MAX_MODULUS_B64_SIZE};
use crate::utils::{base64url, der};

/// Converts a JWK's RSA components into a usable public key
///
/// Pure and deterministic; implementations perform no I/O. Inputs are the
/// Base64URL-encoded `n` and `e` fields exactly as published in the JWK.
pub trait KeyMaterialConverter: Send + Sync {
    /// Convert `(modulus, exponent)` into public-key bytes
    fn to_public_key(&self, modulus_b64: &str, exponent_b64: &str) -> Result<Vec<u8>>;
}

/// Default converter: bounds-check, Base64URL-decode, DER-encode
pub struct RsaComponentsConverter;

impl KeyMaterialConverter for RsaComponentsConverter {
    fn to_public_key(&self, modulus_b64: &str, exponent_b64: &str) -> Result<Vec<u8>> {
        // Base64URL: 4 chars -> 3 bytes, so max_decoded = (max_encoded * 3) / 4
        const MAX_DECODED_MODULUS: usize = (MAX_MODULUS_B64_SIZE * 3) / 4;
        const MAX_DECODED_EXPONENT: usize = (MAX_EXPONENT_B64_SIZE * 3) / 4;

        if modulus_b64.len() > MAX_MODULUS_B64_SIZE {
            return Err(Error::KeyFieldTooLarge {
                field: "n".into(),
                size: modulus_b64.len(),
                max: MAX_MODULUS_B64_SIZE,
            });
        }
        if exponent_b64.len() > MAX_EXPONENT_B64_SIZE {
            return Err(Error::KeyFieldTooLarge {
                field: "e".into(),
                size: exponent_b64.len(),
                max: MAX_EXPONENT_B64_SIZE,
            });
        }

        let n = base64url::decode_bytes(modulus_b64, MAX_DECODED_MODULUS)?;
        let e = base64url::decode_bytes(exponent_b64, MAX_DECODED_EXPONENT)?;

        der::rsa_public_key_der(&n, &e)
    }
}

/// A successful key lookup: public-key bytes plus carried-over endorsements
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedKey {
    /// DER-encoded RSAPublicKey, ready for signature verification
    pub key_der: Vec<u8>,
    /// Endorsement strings carried over from the JWK entry (empty if none)
    pub endorsements: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

    #[test]
    fn test_convert_rsa_components() {
        let n = URL_SAFE_NO_PAD.encode([0x00, 0x01, 0x02, 0x03]);
        let e = URL_SAFE_NO_PAD.encode([0x01, 0x00, 0x01]); // 65537

        let key = RsaComponentsConverter.to_public_key(&n, &e).expect("convert");
        assert!(!key.is_empty());
        assert_eq!(key[0], 0x30); // SEQUENCE
    }

    #[test]
    fn test_convert_invalid_base64() {
        let result = RsaComponentsConverter.to_public_key("!!!not-base64!!!", "AQAB");
        assert!(matches!(result, Err(Error::InvalidBase64(_))));
    }

    #[test]
    fn test_convert_oversized_modulus() {
        let oversized = "A".repeat(MAX_MODULUS_B64_SIZE + 1);
        let result = RsaComponentsConverter.to_public_key(&oversized, "AQAB");
        assert!(matches!(
            result,
            Err(Error::KeyFieldTooLarge { ref field, .. }) if field == "n"
        ));
    }

    #[test]
    fn test_convert_oversized_exponent() {
        let n = URL_SAFE_NO_PAD.encode([0x01, 0x02]);
        let oversized = "A".repeat(MAX_EXPONENT_B64_SIZE + 1);
        let result = RsaComponentsConverter.to_public_key(&n, &oversized);
        assert!(matches!(
            result,
            Err(Error::KeyFieldTooLarge { ref field, .. }) if field == "e"
        ));
    }

    #[test]
    fn test_convert_empty_components() {
        let result = RsaComponentsConverter.to_public_key("", "");
        assert!(matches!(result, Err(Error::KeyEncoding(_))));
    }
}
