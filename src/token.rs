//! Bearer token wire types

use miniserde::Deserialize;

/// Token header structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenHeader {
    /// Algorithm used for signing
    #[serde(rename = "alg")]
    pub algorithm: String,

    /// Key ID, selecting the signing key from the provider's JWK set
    #[serde(rename = "kid")]
    pub key_id: Option<String>,
}

/// Claims carried by a verified connector token
///
/// `serviceurl` is the connector-specific claim naming the service endpoint
/// the activity came from; it is passed through to the caller untouched.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Claims {
    /// Issuer (iss)
    #[serde(rename = "iss")]
    pub issuer: Option<String>,

    /// Subject (sub)
    #[serde(rename = "sub")]
    pub subject: Option<String>,

    /// Audience (aud)
    #[serde(rename = "aud")]
    pub audience: Option<String>,

    /// Expiration time (exp), seconds since Unix epoch
    #[serde(rename = "exp")]
    pub expiration: Option<i64>,

    /// Not before (nbf), seconds since Unix epoch
    #[serde(rename = "nbf")]
    pub not_before: Option<i64>,

    /// Issued at (iat), seconds since Unix epoch
    #[serde(rename = "iat")]
    pub issued_at: Option<i64>,

    /// Originating service URL (serviceurl)
    #[serde(rename = "serviceurl")]
    pub service_url: Option<String>,
}
