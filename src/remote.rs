//! The HTTP-fetch seam consumed by the signing key cache
//!
//! The cache never talks to the network directly; it goes through the
//! `MetadataFetcher` trait. The trait reports the raw status code and body
//! and leaves classification (bad status, empty body, unparseable JSON) to
//! the caller, so the whole error taxonomy is testable without a transport.

use crate::error::{Error, Result};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Default per-request timeout for the built-in `HttpFetcher`
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// A fetched JSON document: HTTP status plus the raw response body
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    /// HTTP status code of the response
    pub status: u16,
    /// Raw response body bytes
    pub body: Vec<u8>,
}

/// Capability to fetch a JSON document over HTTP
///
/// Implementations return the status and body of the response, or
/// `Error::Transport` when the request itself fails (connect error,
/// timeout, TLS failure). Redirects, headers, and other transport details
/// are the implementation's concern.
pub trait MetadataFetcher: Send + Sync {
    /// Fetch the document at `url`
    fn fetch(&self, url: &str)
        -> Pin<Box<dyn Future<Output = Result<FetchedDocument>> + Send + '_>>;
}

/// `MetadataFetcher` backed by a shared `reqwest` client
///
/// Each request is subject to the timeout given at construction; a timed-out
/// request surfaces as `Error::Transport` like any other network failure.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher whose requests time out after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Transport(format!("client: {e}")))?;

        Ok(Self { client })
    }
}

impl MetadataFetcher for HttpFetcher {
    fn fetch(
        &self,
        url: &str,
    ) -> Pin<Box<dyn Future<Output = Result<FetchedDocument>> + Send + '_>> {
        let client = self.client.clone();
        let url = url.to_string();
        Box::pin(async move {
            let response = client
                .get(&url)
                .send()
                .await
                .map_err(|e| Error::Transport(format!("network: {e}")))?;

            let status = response.status().as_u16();

            let body = response
                .bytes()
                .await
                .map_err(|e| Error::Transport(format!("network: {e}")))?
                .to_vec();

            Ok(FetchedDocument { status, body })
        })
    }
}
