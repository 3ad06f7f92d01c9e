//! Token verifier integration tests
//!
//! Mints real RS256 tokens with a generated RSA key, publishes the matching
//! JWK set through a mockito server, and verifies tokens end-to-end through
//! discovery -> JWKS -> key resolution -> signature and claims checks.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use connector_auth::{
    Error, HttpFetcher, SigningKeyCache, TokenVerifier, VerifyOptions, DEFAULT_FETCH_TIMEOUT,
};
use ring::rand::SystemRandom;
use ring::signature::{RsaKeyPair, RSA_PKCS1_SHA256};
use rsa::pkcs8::EncodePrivateKey;
use rsa::traits::PublicKeyParts;
use std::sync::{Arc, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

const KID: &str = "integration-key";
const ISSUER: &str = "https://idp.example";
const AUDIENCE: &str = "my-app-id";

struct TestKey {
    pkcs8: Vec<u8>,
    n_b64: String,
    e_b64: String,
}

/// One shared 2048-bit keypair for the whole suite; generation is slow
fn test_key() -> &'static TestKey {
    static KEY: OnceLock<TestKey> = OnceLock::new();
    KEY.get_or_init(|| {
        let mut rng = rand::thread_rng();
        let private_key = rsa::RsaPrivateKey::new(&mut rng, 2048).expect("generate key");
        let public_key = private_key.to_public_key();

        let pkcs8 = private_key
            .to_pkcs8_der()
            .expect("serialize to PKCS#8")
            .as_bytes()
            .to_vec();

        TestKey {
            pkcs8,
            n_b64: URL_SAFE_NO_PAD.encode(public_key.n().to_bytes_be()),
            e_b64: URL_SAFE_NO_PAD.encode(public_key.e().to_bytes_be()),
        }
    })
}

fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_secs() as i64
}

fn sign_token(claims: &serde_json::Value) -> String {
    let header = serde_json::json!({ "alg": "RS256", "typ": "JWT", "kid": KID });
    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(header.to_string()),
        URL_SAFE_NO_PAD.encode(claims.to_string())
    );

    let keypair = RsaKeyPair::from_pkcs8(&test_key().pkcs8).expect("keypair");
    let mut signature = vec![0u8; keypair.public().modulus_len()];
    keypair
        .sign(
            &RSA_PKCS1_SHA256,
            &SystemRandom::new(),
            signing_input.as_bytes(),
            &mut signature,
        )
        .expect("sign");

    format!("{}.{}", signing_input, URL_SAFE_NO_PAD.encode(signature))
}

fn default_claims() -> serde_json::Value {
    serde_json::json!({
        "iss": ISSUER,
        "aud": AUDIENCE,
        "exp": now() + 3600,
        "nbf": now() - 60,
        "serviceurl": "https://smba.example/amer"
    })
}

/// Publish discovery + JWKS mocks and build a verifier on top of them
async fn verifier_for(
    server: &mut mockito::ServerGuard,
    endorsements: Option<&[&str]>,
    options: VerifyOptions,
) -> TokenVerifier {
    let key = test_key();
    let endorsements_json = match endorsements {
        Some(channels) => format!(
            r#","endorsements":[{}]"#,
            channels
                .iter()
                .map(|c| format!(r#""{c}""#))
                .collect::<Vec<_>>()
                .join(",")
        ),
        None => String::new(),
    };
    let jwks_body = format!(
        r#"{{ "keys": [{{"kty":"RSA","use":"sig","kid":"{}","n":"{}","e":"{}"{}}}] }}"#,
        KID, key.n_b64, key.e_b64, endorsements_json
    );

    let _discovery = server
        .mock("GET", "/.well-known/openidconfiguration")
        .with_status(200)
        .with_body(format!(r#"{{ "jwks_uri": "{}/keys" }}"#, server.url()))
        .create_async()
        .await;
    let _jwks = server
        .mock("GET", "/keys")
        .with_status(200)
        .with_body(jwks_body)
        .create_async()
        .await;

    let fetcher = HttpFetcher::new(DEFAULT_FETCH_TIMEOUT).expect("client");
    let cache = SigningKeyCache::with_fetcher(
        format!("{}/.well-known/openidconfiguration", server.url()),
        Arc::new(fetcher),
    )
    .expect("cache");

    TokenVerifier::with_options(Arc::new(cache), options)
}

#[tokio::test]
async fn test_verify_end_to_end() {
    let mut server = mockito::Server::new_async().await;
    let verifier = verifier_for(
        &mut server,
        None,
        VerifyOptions::new().issuer(ISSUER).audience(AUDIENCE),
    )
    .await;

    let token = sign_token(&default_claims());
    let claims = verifier.verify(&token, None).await.expect("verifies");

    assert_eq!(claims.issuer.as_deref(), Some(ISSUER));
    assert_eq!(claims.audience.as_deref(), Some(AUDIENCE));
    assert_eq!(claims.service_url.as_deref(), Some("https://smba.example/amer"));
}

#[tokio::test]
async fn test_verify_rejects_tampered_payload() {
    let mut server = mockito::Server::new_async().await;
    let verifier = verifier_for(&mut server, None, VerifyOptions::new()).await;

    let token = sign_token(&default_claims());
    let parts: Vec<&str> = token.split('.').collect();

    let mut claims = default_claims();
    claims["serviceurl"] = serde_json::json!("https://evil.example");
    let tampered = format!(
        "{}.{}.{}",
        parts[0],
        URL_SAFE_NO_PAD.encode(claims.to_string()),
        parts[2]
    );

    assert_eq!(
        verifier.verify(&tampered, None).await,
        Err(Error::SignatureInvalid)
    );
}

#[tokio::test]
async fn test_verify_rejects_expired_token() {
    let mut server = mockito::Server::new_async().await;
    let verifier = verifier_for(&mut server, None, VerifyOptions::new()).await;

    let mut claims = default_claims();
    claims["exp"] = serde_json::json!(now() - 7200);
    let token = sign_token(&claims);

    assert!(matches!(
        verifier.verify(&token, None).await,
        Err(Error::TokenExpired { .. })
    ));
}

#[tokio::test]
async fn test_verify_rejects_wrong_audience() {
    let mut server = mockito::Server::new_async().await;
    let verifier = verifier_for(
        &mut server,
        None,
        VerifyOptions::new().audience("other-app"),
    )
    .await;

    let token = sign_token(&default_claims());

    assert!(matches!(
        verifier.verify(&token, None).await,
        Err(Error::AudienceMismatch { .. })
    ));
}

#[tokio::test]
async fn test_verify_checks_endorsements() {
    let mut server = mockito::Server::new_async().await;
    let verifier = verifier_for(&mut server, Some(&["msteams"]), VerifyOptions::new()).await;

    let token = sign_token(&default_claims());

    // Endorsed channel passes
    assert!(verifier.verify(&token, Some("msteams")).await.is_ok());

    // Unendorsed channel is rejected
    assert_eq!(
        verifier.verify(&token, Some("slack")).await,
        Err(Error::EndorsementMismatch {
            channel: "slack".to_string()
        })
    );
}

#[tokio::test]
async fn test_verify_endorsement_free_key_accepts_any_channel() {
    let mut server = mockito::Server::new_async().await;
    let verifier = verifier_for(&mut server, None, VerifyOptions::new()).await;

    let token = sign_token(&default_claims());

    assert!(verifier.verify(&token, Some("slack")).await.is_ok());
}

#[tokio::test]
async fn test_verify_unknown_kid_after_refresh() {
    let mut server = mockito::Server::new_async().await;
    let verifier = verifier_for(&mut server, None, VerifyOptions::new()).await;

    // Valid signature, but a kid the provider never published
    let header = serde_json::json!({ "alg": "RS256", "kid": "unknown-key" });
    let claims = default_claims();
    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(header.to_string()),
        URL_SAFE_NO_PAD.encode(claims.to_string())
    );
    let token = format!("{}.{}", signing_input, URL_SAFE_NO_PAD.encode("sig"));

    assert_eq!(
        verifier.verify(&token, None).await,
        Err(Error::KeyNotFound("unknown-key".to_string()))
    );
}
