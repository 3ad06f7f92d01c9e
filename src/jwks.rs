//! JWK set wire types
//!
//! Parsed from the provider's JWK set document. Parsing is permissive:
//! entries of any key type are kept as-is and validation happens at lookup
//! time, when a key's material is converted for use. Standard JWK fields
//! this core never consumes (`kty`, `use`, `x5t`, `x5c`) are skipped by the
//! parser.

use miniserde::Deserialize;

/// A provider's published key set
#[derive(Debug, Clone, Deserialize)]
pub struct KeySet {
    /// The keys in the set, in published order
    pub keys: Vec<SigningKey>,
}

/// One entry from the provider's JWK set, immutable once parsed
#[derive(Debug, Clone, Deserialize)]
pub struct SigningKey {
    /// Key ID
    pub kid: Option<String>,
    /// RSA modulus (Base64URL-encoded)
    pub n: Option<String>,
    /// RSA exponent (Base64URL-encoded)
    pub e: Option<String>,
    /// Provider-specific endorsement strings, passed through opaquely
    pub endorsements: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_set() {
        let body = r#"{
            "keys": [
                {"kty":"RSA","use":"sig","kid":"k1","n":"abc","e":"AQAB","x5t":"t1","x5c":["c1"]},
                {"kty":"EC","kid":"k2","crv":"P-256","x":"xx","y":"yy"}
            ]
        }"#;

        let set: KeySet = miniserde::json::from_str(body).expect("parse");
        assert_eq!(set.keys.len(), 2);
        assert_eq!(set.keys[0].kid.as_deref(), Some("k1"));
        assert_eq!(set.keys[0].n.as_deref(), Some("abc"));
        assert_eq!(set.keys[0].e.as_deref(), Some("AQAB"));
        // EC entry parses, but carries no RSA material
        assert_eq!(set.keys[1].kid.as_deref(), Some("k2"));
        assert_eq!(set.keys[1].n, None);
        assert_eq!(set.keys[1].e, None);
    }

    #[test]
    fn test_parse_key_set_endorsements() {
        let body = r#"{
            "keys": [
                {"kty":"RSA","kid":"k1","n":"abc","e":"AQAB","endorsements":["msteams","webchat"]}
            ]
        }"#;

        let set: KeySet = miniserde::json::from_str(body).expect("parse");
        assert_eq!(
            set.keys[0].endorsements,
            Some(vec!["msteams".to_string(), "webchat".to_string()])
        );
    }

    #[test]
    fn test_parse_key_set_optional_fields() {
        let body = r#"{"keys": [{"kty":"RSA"}]}"#;

        let set: KeySet = miniserde::json::from_str(body).expect("parse");
        assert_eq!(set.keys.len(), 1);
        assert_eq!(set.keys[0].kid, None);
        assert_eq!(set.keys[0].endorsements, None);
    }
}
