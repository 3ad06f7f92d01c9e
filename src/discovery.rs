//! OpenID Connect discovery document
//!
//! The provider's metadata endpoint returns a discovery document describing
//! its endpoints. Only the JWK-set location is consumed here; every other
//! field (`issuer`, `authorization_endpoint`, supported algorithms, ...)
//! passes through unused.

use miniserde::Deserialize;

/// Minimal discovery document containing the JWKS URI
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DiscoveryDocument {
    /// Location of the provider's current JWK set
    pub jwks_uri: String,
}
