//! DER encoding for RSA public keys built from JWK components
//!
//! This module uses the RustCrypto `der` crate for standards-compliant
//! encoding of the RSAPublicKey structure consumed by the ring backend.

use crate::error::{Error, Result};
use der::{asn1::UintRef, Encode, Sequence};

/// RSA public key structure for DER encoding
///
/// Represents RSAPublicKey as defined in RFC 3447:
/// RSAPublicKey ::= SEQUENCE {
///     modulus           INTEGER,  -- n
///     publicExponent    INTEGER   -- e
/// }
#[derive(Sequence)]
struct RsaPublicKey<'a> {
    /// RSA modulus (n)
    modulus: UintRef<'a>,
    /// RSA public exponent (e)
    public_exponent: UintRef<'a>,
}

/// Build a DER-encoded RSAPublicKey from modulus (n) and exponent (e) bytes
pub(crate) fn rsa_public_key_der(n: &[u8], e: &[u8]) -> Result<Vec<u8>> {
    if n.is_empty() || e.is_empty() {
        return Err(Error::KeyEncoding("rsa key missing n or e".into()));
    }

    // Practical RSA keys are 2048-4096 bits (256-512 bytes modulus);
    // 8192 bytes (65536 bits) is far beyond any published signing key
    const MAX_RSA_MODULUS_SIZE: usize = 8192;
    if n.len() > MAX_RSA_MODULUS_SIZE {
        return Err(Error::KeyEncoding(format!(
            "RSA modulus too large: {} bytes (maximum: {} bytes)",
            n.len(),
            MAX_RSA_MODULUS_SIZE
        )));
    }

    // UintRef handles INTEGER encoding including the leading zero for
    // positive values with the high bit set
    let n_uint =
        UintRef::new(n).map_err(|e| Error::KeyEncoding(format!("failed to encode modulus: {e}")))?;
    let e_uint = UintRef::new(e)
        .map_err(|e| Error::KeyEncoding(format!("failed to encode exponent: {e}")))?;

    RsaPublicKey {
        modulus: n_uint,
        public_exponent: e_uint,
    }
    .to_der()
    .map_err(|e| Error::KeyEncoding(format!("failed to encode RSA public key: {e}")))
}
