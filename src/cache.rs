//! Signing key cache
//!
//! One `SigningKeyCache` is created per identity-provider endpoint and lives
//! for the lifetime of the authentication component that owns it. It holds
//! the provider's published signing keys as a single snapshot, refreshed in
//! two steps (discovery document, then JWK set) once the snapshot goes
//! stale. A failed refresh never disturbs the snapshot: lookups fall back to
//! whatever key material is already cached, and the failure is logged rather
//! than surfaced.

use crate::discovery::DiscoveryDocument;
use crate::error::{Error, Result};
use crate::jwks::{KeySet, SigningKey};
use crate::keys::{KeyMaterialConverter, ResolvedKey, RsaComponentsConverter};
use crate::limits::{MAX_DISCOVERY_RESPONSE_SIZE, MAX_JWKS_RESPONSE_SIZE, MAX_KEY_SET_SIZE};
use crate::remote::{HttpFetcher, MetadataFetcher, DEFAULT_FETCH_TIMEOUT};
use crate::url::{validate_jwks_uri, validate_metadata_url};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

/// Snapshot age at which a refresh is attempted (5 days)
///
/// The comparison is inclusive: a snapshot aged exactly this long is stale.
pub const STALE_AFTER: Duration = Duration::from_secs(5 * 24 * 60 * 60);

/// Cached signing keys plus the time of the refresh that produced them
///
/// Either empty (never refreshed, or no refresh has succeeded yet) or a
/// complete set from one successful refresh, never a partial merge.
#[derive(Default)]
struct Snapshot {
    keys: Vec<SigningKey>,
    refreshed_at: Option<Instant>,
}

/// Cache of an OpenID Connect provider's signing keys
pub struct SigningKeyCache {
    metadata_url: String,
    fetcher: Arc<dyn MetadataFetcher>,
    converter: Arc<dyn KeyMaterialConverter>,
    stale_after: Duration,
    snapshot: RwLock<Snapshot>,
    /// De-duplicates concurrent stale detections: at most one refresh is in
    /// flight per cache
    refresh_gate: Mutex<()>,
}

impl SigningKeyCache {
    /// Create a cache for the provider metadata document at `metadata_url`,
    /// fetching over HTTP with the default timeout
    ///
    /// No network call happens here; the first `resolve` triggers the
    /// initial refresh.
    pub fn new(metadata_url: impl Into<String>) -> Result<Self> {
        let fetcher = HttpFetcher::new(DEFAULT_FETCH_TIMEOUT)?;
        Self::with_fetcher(metadata_url, Arc::new(fetcher))
    }

    /// Create a cache with a custom fetcher
    pub fn with_fetcher(
        metadata_url: impl Into<String>,
        fetcher: Arc<dyn MetadataFetcher>,
    ) -> Result<Self> {
        let metadata_url = metadata_url.into();
        validate_metadata_url(&metadata_url)?;

        Ok(Self {
            metadata_url,
            fetcher,
            converter: Arc::new(RsaComponentsConverter),
            stale_after: STALE_AFTER,
            snapshot: RwLock::new(Snapshot::default()),
            refresh_gate: Mutex::new(()),
        })
    }

    /// Replace the key material converter
    pub fn converter(mut self, converter: Arc<dyn KeyMaterialConverter>) -> Self {
        self.converter = converter;
        self
    }

    /// Override the staleness threshold
    pub fn stale_after(mut self, stale_after: Duration) -> Self {
        self.stale_after = stale_after;
        self
    }

    /// The metadata URL this cache was created for
    pub fn metadata_url(&self) -> &str {
        &self.metadata_url
    }

    /// Resolve a signing key by its key ID
    ///
    /// Refreshes the snapshot first when it is stale. A refresh failure is
    /// logged and swallowed; the lookup then runs against the retained
    /// (possibly empty) snapshot. This operation never fails outward:
    /// `None` covers an unknown `kid`, a matching entry without usable RSA
    /// material, and a cache that has never been populated.
    pub async fn resolve(&self, key_id: &str) -> Option<ResolvedKey> {
        if self.is_stale().await {
            let _gate = self.refresh_gate.lock().await;
            // Re-check: another caller may have refreshed while we waited
            if self.is_stale().await {
                if let Err(err) = self.refresh().await {
                    warn!(
                        url = %self.metadata_url,
                        error = %err,
                        "signing key refresh failed, serving cached snapshot"
                    );
                }
            }
        }

        self.find_key(key_id).await
    }

    /// Fetch the discovery document and the JWK set it references, then
    /// replace the snapshot
    ///
    /// The JWK set is only fetched after the discovery document succeeds,
    /// and the snapshot is only touched after both steps succeed.
    pub async fn refresh(&self) -> Result<()> {
        let body = self
            .fetch_document(&self.metadata_url, MAX_DISCOVERY_RESPONSE_SIZE)
            .await?;
        let discovery: DiscoveryDocument = miniserde::json::from_str(&body)
            .map_err(|_| Error::Parse("discovery: invalid discovery json".to_string()))?;
        if discovery.jwks_uri.trim().is_empty() {
            return Err(Error::Parse(
                "discovery: missing or empty jwks_uri".to_string(),
            ));
        }
        validate_jwks_uri(&discovery.jwks_uri)?;

        let body = self
            .fetch_document(&discovery.jwks_uri, MAX_JWKS_RESPONSE_SIZE)
            .await?;
        let set: KeySet = miniserde::json::from_str(&body)
            .map_err(|_| Error::Parse("jwks: invalid jwks json".to_string()))?;
        if set.keys.len() > MAX_KEY_SET_SIZE {
            return Err(Error::KeySetTooLarge {
                key_count: set.keys.len(),
                max: MAX_KEY_SET_SIZE,
            });
        }

        let mut snapshot = self.snapshot.write().await;
        snapshot.keys = set.keys;
        snapshot.refreshed_at = Some(Instant::now());
        info!(
            url = %self.metadata_url,
            key_count = snapshot.keys.len(),
            "signing key snapshot refreshed"
        );

        Ok(())
    }

    /// Fetch one document and classify the non-transport failure modes
    async fn fetch_document(&self, url: &str, max_size: usize) -> Result<String> {
        debug!(url = %url, "fetching metadata document");
        let document = self.fetcher.fetch(url).await?;

        if document.status >= 400 {
            return Err(Error::BadStatus {
                status: document.status,
            });
        }
        if document.body.is_empty() {
            return Err(Error::EmptyBody);
        }
        if document.body.len() > max_size {
            return Err(Error::ResponseTooLarge {
                size: document.body.len(),
                max: max_size,
            });
        }

        String::from_utf8(document.body)
            .map_err(|e| Error::Parse(format!("utf8 decode failed: {e}")))
    }

    async fn is_stale(&self) -> bool {
        let snapshot = self.snapshot.read().await;
        match snapshot.refreshed_at {
            Some(refreshed_at) => refreshed_at.elapsed() >= self.stale_after,
            None => true,
        }
    }

    /// Look up the first key matching `key_id` in stored order and convert
    /// its material
    ///
    /// First match wins even when a later entry with the same `kid` would
    /// have been convertible. A match without both modulus and exponent is
    /// never usable for verification and resolves to `None`.
    async fn find_key(&self, key_id: &str) -> Option<ResolvedKey> {
        let snapshot = self.snapshot.read().await;
        let key = snapshot
            .keys
            .iter()
            .find(|key| key.kid.as_deref() == Some(key_id))?;

        let (n, e) = match (key.n.as_deref(), key.e.as_deref()) {
            (Some(n), Some(e)) => (n, e),
            _ => {
                debug!(kid = %key_id, "matching key has no RSA material");
                return None;
            }
        };

        match self.converter.to_public_key(n, e) {
            Ok(key_der) => Some(ResolvedKey {
                key_der,
                endorsements: key.endorsements.clone().unwrap_or_default(),
            }),
            Err(err) => {
                warn!(kid = %key_id, error = %err, "failed to convert signing key material");
                None
            }
        }
    }
}
