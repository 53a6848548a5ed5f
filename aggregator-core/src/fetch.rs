use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::error::PollError;

/// Retrieval endpoint the aggregator goes through for every outbound fetch.
pub const DEFAULT_PROXY: &str = "https://allorigins.hexlet.app/get";

/// The proxy wraps the upstream document in a JSON envelope.
#[derive(Debug, Deserialize)]
struct ProxyEnvelope {
    contents: String,
}

/// Fetches raw feed text through the retrieval proxy.
///
/// Transport failures, timeouts, and non-success proxy responses all
/// surface as [`PollError::Network`]. No retries here; the scheduler's
/// recurring interval is the retry policy.
#[derive(Debug, Clone)]
pub struct ProxyFetcher {
    client: Client,
    proxy: Url,
    request_timeout: Duration,
}

impl ProxyFetcher {
    pub fn new(client: Client, proxy: Url, request_timeout: Duration) -> Self {
        Self {
            client,
            proxy,
            request_timeout,
        }
    }

    /// The proxied form of `target`, with caching disabled upstream.
    pub fn proxied_url(&self, target: &str) -> Url {
        let mut url = self.proxy.clone();
        url.query_pairs_mut()
            .append_pair("disableCache", "true")
            .append_pair("url", target);
        url
    }

    pub async fn fetch(&self, target: &str) -> Result<String, PollError> {
        let response = self
            .client
            .get(self.proxied_url(target))
            .timeout(self.request_timeout)
            .send()
            .await?
            .error_for_status()?;

        let envelope: ProxyEnvelope = response.json().await?;
        Ok(envelope.contents)
    }
}
