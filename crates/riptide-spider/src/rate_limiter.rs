//! Per-host adaptive rate limiting.
//!
//! Delay starts at 1s per host, halves (divides by `k`) towards a floor on
//! success, and grows (multiplies by `k`) towards a ceiling on failure.

use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;

const BACKOFF_FACTOR: f64 = 1.5;
const MIN_DELAY_SECS: f64 = 1.0;
const MAX_DELAY_SECS: f64 = 60.0;

struct HostEntry {
    delay_secs: f64,
    last_request_at: Option<Instant>,
}

/// Thread-safe per-host delay tracker. `wait` and `update` may be called
/// concurrently across hosts; same-host calls are serialized by the caller
/// (the scheduler holds one in-flight fetch per host at a time).
pub struct RateLimiter {
    hosts: DashMap<String, HostEntry>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            hosts: DashMap::new(),
        }
    }

    /// Blocks until at least the host's current delay has elapsed since its
    /// last recorded request, then records the new request time.
    pub async fn wait(&self, host: &str) {
        let sleep_for = {
            let mut entry = self
                .hosts
                .entry(host.to_string())
                .or_insert_with(|| HostEntry {
                    delay_secs: MIN_DELAY_SECS,
                    last_request_at: None,
                });

            let now = Instant::now();
            let sleep_for = match entry.last_request_at {
                Some(last) => {
                    let elapsed = now.saturating_duration_since(last);
                    let required = Duration::from_secs_f64(entry.delay_secs);
                    required.saturating_sub(elapsed)
                }
                None => Duration::ZERO,
            };
            entry.last_request_at = Some(now + sleep_for);
            sleep_for
        };

        if !sleep_for.is_zero() {
            tokio::time::sleep(sleep_for).await;
        }
    }

    /// Adjusts the host's delay after an outcome: halve towards the floor on
    /// success, multiply towards the ceiling on failure.
    pub fn update(&self, host: &str, success: bool) {
        let mut entry = self
            .hosts
            .entry(host.to_string())
            .or_insert_with(|| HostEntry {
                delay_secs: MIN_DELAY_SECS,
                last_request_at: None,
            });

        entry.delay_secs = if success {
            (entry.delay_secs / BACKOFF_FACTOR).max(MIN_DELAY_SECS)
        } else {
            (entry.delay_secs * BACKOFF_FACTOR).min(MAX_DELAY_SECS)
        };
    }

    /// The current delay for a host, or the default for an unseen host.
    pub fn current_delay(&self, host: &str) -> f64 {
        self.hosts
            .get(host)
            .map(|e| e.delay_secs)
            .unwrap_or(MIN_DELAY_SECS)
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
