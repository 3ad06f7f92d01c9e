//! # connector-auth — Bearer-Token Authentication for Message Connectors
//!
//! This crate is the credential-verification core of a message-connector
//! service: it caches the signing-key metadata published by an OpenID
//! Connect identity provider and uses it to verify inbound bearer tokens.
//!
//! ## Overview
//!
//! An identity provider publishes a discovery document naming the location
//! of its current JSON Web Key set; tokens it signs carry a `kid` header
//! selecting one of those keys. [`SigningKeyCache`] owns one provider's key
//! material: it refreshes the snapshot once it goes stale (after
//! [`STALE_AFTER`], five days), resolves keys by `kid`, and — crucially —
//! keeps serving the retained snapshot when a refresh fails, so transient
//! provider outages never take authentication down with them.
//!
//! Two seams keep the core testable and transport-agnostic:
//!
//! - [`MetadataFetcher`] performs the HTTP fetches. The built-in
//!   [`HttpFetcher`] uses `reqwest` with a per-request timeout.
//! - [`KeyMaterialConverter`] turns a JWK's RSA component pair into the
//!   public-key bytes the signature backend consumes. The built-in
//!   [`RsaComponentsConverter`] produces a DER-encoded RSAPublicKey.
//!
//! [`TokenVerifier`] sits on top of the cache: it parses an RS256 bearer
//! token, resolves its signing key, checks channel endorsements, verifies
//! the signature with `ring`, and validates issuer, audience, and temporal
//! claims.
//!
//! ## Quick Start
//!
//! ```ignore
//! use connector_auth::{SigningKeyCache, TokenVerifier, VerifyOptions};
//! use std::sync::Arc;
//!
//! let cache = Arc::new(SigningKeyCache::new(
//!     "https://login.example.com/.well-known/openidconfiguration",
//! )?);
//!
//! let verifier = TokenVerifier::with_options(
//!     cache,
//!     VerifyOptions::new()
//!         .issuer("https://login.example.com")
//!         .audience("my-app-id"),
//! );
//!
//! let claims = verifier.verify(bearer_token, Some(channel_id)).await?;
//! println!("activity from {:?}", claims.service_url);
//! ```
//!
//! ## Degraded-Mode Behavior
//!
//! `SigningKeyCache::resolve` is total: it returns the resolved key or
//! `None`, never an error. All refresh failures (transport errors, HTTP
//! error statuses, empty bodies, unparseable documents) abort the refresh
//! without touching the cached snapshot and are reported through `tracing`.

// Core modules
pub mod cache;
pub mod error;
pub mod jwks;
pub mod keys;
pub mod remote;
pub mod token;
pub mod verifier;

// Internal modules
mod discovery;
mod limits;
mod url;
mod utils;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use cache::{SigningKeyCache, STALE_AFTER};
pub use error::{Error, Result};
pub use jwks::{KeySet, SigningKey};
pub use keys::{KeyMaterialConverter, ResolvedKey, RsaComponentsConverter};
pub use remote::{FetchedDocument, HttpFetcher, MetadataFetcher, DEFAULT_FETCH_TIMEOUT};
pub use token::{Claims, TokenHeader};
pub use verifier::{TokenVerifier, VerifyOptions, DEFAULT_CLOCK_SKEW_SECS};
