//! Per-host robots.txt cache, RFC 9309 evaluation.
//!
//! A network error or 4xx on the robots fetch itself is treated as
//! permissive; a 5xx is treated as a deny cached for a short TTL, then
//! retried.

use dashmap::DashMap;
use riptide_fetch::{FetchResponse, Fetcher};
use riptide_types::{Result, RiptideError};
use robotstxt::DefaultMatcher;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const DENY_TTL: Duration = Duration::from_secs(60);

#[derive(Clone)]
enum CachedPolicy {
    /// robots.txt body fetched successfully.
    Fetched(String),
    /// Fetch failed or returned 5xx; denies everything until `retry_at`.
    Unreachable { retry_at: Instant },
    /// Fetch returned 4xx or a network error that we treat as "no policy".
    Permissive,
}

/// Caches and evaluates robots.txt per host for the run's lifetime.
pub struct RobotsCache {
    user_agent: String,
    entries: DashMap<String, CachedPolicy>,
}

impl RobotsCache {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            entries: DashMap::new(),
        }
    }

    /// Returns whether `url` may be fetched under the cached policy for its
    /// host, fetching and caching that policy on first touch.
    pub async fn can_fetch(&self, fetcher: &Fetcher, url: &url::Url) -> bool {
        let Some(host) = url.host_str() else {
            return true;
        };
        let host = host.to_string();

        let policy = self.policy_for_host(fetcher, &host).await;
        match policy {
            CachedPolicy::Permissive => true,
            CachedPolicy::Unreachable { .. } => false,
            CachedPolicy::Fetched(body) => {
                let mut matcher = DefaultMatcher::default();
                matcher.one_agent_allowed_by_robots(&body, &self.user_agent, url.as_str())
            }
        }
    }

    async fn policy_for_host(&self, fetcher: &Fetcher, host: &str) -> CachedPolicy {
        if let Some(cached) = self.entries.get(host) {
            if let CachedPolicy::Unreachable { retry_at } = &*cached {
                if Instant::now() < *retry_at {
                    return cached.clone();
                }
            } else {
                return cached.clone();
            }
        }

        let robots_url = format!("https://{host}/robots.txt");
        let result = fetcher.fetch(&robots_url, None).await;
        let policy = Self::classify(host, result);

        self.entries.insert(host.to_string(), policy.clone());
        policy
    }

    /// Maps a robots.txt fetch outcome to a cached policy. `Fetcher::fetch`
    /// turns every non-2xx status, 5xx included, into an `Err`, so the 5xx
    /// case is distinguished from other failures by matching on
    /// `RiptideError::HttpStatus` rather than on the response.
    fn classify(host: &str, result: Result<FetchResponse>) -> CachedPolicy {
        match result {
            Ok(resp) => {
                let body = String::from_utf8_lossy(&resp.body).into_owned();
                debug!(host, "fetched robots.txt");
                CachedPolicy::Fetched(body)
            }
            Err(RiptideError::HttpStatus { status, .. }) if status >= 500 => {
                warn!(host, status, "robots.txt 5xx, denying temporarily");
                CachedPolicy::Unreachable {
                    retry_at: Instant::now() + DENY_TTL,
                }
            }
            Err(e) => {
                warn!(host, error = %e, "robots.txt fetch failed, treating as permissive");
                CachedPolicy::Permissive
            }
        }
    }
}
