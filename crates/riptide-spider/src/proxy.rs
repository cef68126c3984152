//! Round-robin outbound proxy pool with liveness revalidation.

use riptide_fetch::Fetcher;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;
use tracing::{info, warn};

const ECHO_ENDPOINT: &str = "https://httpbin.org/ip";

/// Rotating proxy pool. `get` is a cheap, lock-light round-robin pick;
/// `revalidate` drops proxies that fail a liveness check against an echo
/// endpoint.
pub struct ProxyPool {
    proxies: RwLock<Vec<String>>,
    next: AtomicUsize,
}

impl ProxyPool {
    pub fn new(proxies: Vec<String>) -> Self {
        Self {
            proxies: RwLock::new(proxies),
            next: AtomicUsize::new(0),
        }
    }

    /// Returns the next proxy in rotation, or `None` if the pool is empty
    /// (direct connection).
    pub fn get(&self) -> Option<String> {
        let proxies = self.proxies.read().unwrap();
        if proxies.is_empty() {
            return None;
        }
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % proxies.len();
        Some(proxies[idx].clone())
    }

    /// Pings every configured proxy via the echo endpoint and drops any that
    /// fail to respond with 200 within the fetcher's timeout.
    pub async fn revalidate(&self, fetcher: &Fetcher) {
        let candidates = self.proxies.read().unwrap().clone();
        let mut alive = Vec::with_capacity(candidates.len());
        for proxy in candidates {
            match fetcher.fetch(ECHO_ENDPOINT, Some(&proxy)).await {
                Ok(resp) if resp.is_success() => alive.push(proxy),
                Ok(resp) => warn!(proxy, status = resp.status, "proxy liveness check failed"),
                Err(e) => warn!(proxy, error = %e, "proxy liveness check errored"),
            }
        }
        info!(alive = alive.len(), "proxy revalidation complete");
        *self.proxies.write().unwrap() = alive;
    }

    pub fn len(&self) -> usize {
        self.proxies.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
