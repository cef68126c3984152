//! The crawler's HTTP fetcher.
//!
//! One GET per call, with the configured user agent, a hard timeout, and an
//! optional proxy. No retries here — retry/backoff policy lives in the
//! scheduler and rate limiter, not the transport layer.

use dashmap::DashMap;
use riptide_types::{Result, RiptideError};
use std::time::Duration;
use tracing::{instrument, warn};

const MAX_REDIRECTS: usize = 5;

/// Outcome of a single fetch.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Concurrent HTTP GET fetcher with per-proxy connection pooling.
///
/// `reqwest::Client` binds its proxy configuration at construction time, so
/// the fetcher keeps one pooled client per distinct proxy (plus one for the
/// direct/no-proxy case) rather than rebuilding a client per request.
pub struct Fetcher {
    user_agent: String,
    timeout: Duration,
    clients: DashMap<Option<String>, reqwest::Client>,
}

impl Fetcher {
    pub fn new(user_agent: impl Into<String>, timeout: Duration) -> Self {
        Self {
            user_agent: user_agent.into(),
            timeout,
            clients: DashMap::new(),
        }
    }

    fn client_for(&self, proxy: Option<&str>) -> Result<reqwest::Client> {
        let key = proxy.map(|p| p.to_string());
        if let Some(existing) = self.clients.get(&key) {
            return Ok(existing.clone());
        }

        let mut builder = reqwest::Client::builder()
            .user_agent(self.user_agent.clone())
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .cookie_store(false);

        if let Some(proxy_url) = proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| RiptideError::Configuration(format!("invalid proxy {proxy_url:?}: {e}")))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| RiptideError::Transport(format!("failed to build HTTP client: {e}")))?;

        self.clients.insert(key, client.clone());
        Ok(client)
    }

    /// Performs one GET request against `url`, optionally via `proxy`.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch(&self, url: &str, proxy: Option<&str>) -> Result<FetchResponse> {
        let client = self.client_for(proxy)?;

        let resp = client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                RiptideError::Timeout(self.timeout.as_millis() as u64)
            } else {
                RiptideError::Transport(e.to_string())
            }
        })?;

        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let body = resp
            .bytes()
            .await
            .map_err(|e| RiptideError::Transport(format!("failed to read body: {e}")))?
            .to_vec();

        if !(200..300).contains(&status) {
            warn!(status, url, "non-2xx response");
            return Err(RiptideError::HttpStatus {
                status,
                url: url.to_string(),
            });
        }

        Ok(FetchResponse {
            status,
            content_type,
            body,
        })
    }
}
