//! The main crawl loop: binds frontier, politeness, fetching, extraction,
//! scoring, and learning into a bounded worker pool.

use crate::dedup::DedupFilter;
use crate::extractor::BasicExtractor;
use crate::frontier::Frontier;
use crate::proxy::ProxyPool;
use crate::rate_limiter::RateLimiter;
use crate::robots::RobotsCache;
use crate::scorer::{LexicalScorer, LinkScorer, ScoreContext};
use crate::sitemap::SitemapSeeder;
use crate::types::normalize_url;
use dashmap::DashMap;
use riptide_config::EngineConfig;
use riptide_fetch::Fetcher;
use riptide_types::PageRecord;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::learner::RelevanceLearner;

/// Shared, run-scoped state for all workers.
pub struct Engine {
    config: EngineConfig,
    frontier: Frontier,
    rate_limiter: RateLimiter,
    robots: RobotsCache,
    proxies: ProxyPool,
    dedup: DedupFilter,
    fetcher: Fetcher,
    scorer: LexicalScorer,
    extractor: BasicExtractor,
    learner: Mutex<RelevanceLearner>,
    host_accepted: DashMap<String, usize>,
    results: Mutex<Vec<PageRecord>>,
    cancelled: std::sync::atomic::AtomicBool,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let timeout = Duration::from_secs(config.fetch_timeout_secs);
        let fetcher = Fetcher::new(config.user_agent.clone(), timeout);
        let scorer = LexicalScorer::new(
            config.priority_rules.clone(),
            config.keyword_weights.clone(),
            config.content_type_weights.clone(),
            config.target_keywords.clone(),
        );
        let frontier = Frontier::new(config.frontier_capacity);
        let proxies = ProxyPool::new(config.proxies.clone());
        let robots = RobotsCache::new(config.user_agent.clone());

        Self {
            config,
            frontier,
            rate_limiter: RateLimiter::new(),
            robots,
            proxies,
            dedup: DedupFilter::new(),
            fetcher,
            scorer,
            extractor: BasicExtractor,
            learner: Mutex::new(RelevanceLearner::new()),
            host_accepted: DashMap::new(),
            results: Mutex::new(Vec::new()),
            cancelled: std::sync::atomic::AtomicBool::new(false),
        }
    }

    /// Seeds the frontier from the configuration's seed URLs (depth 0), and,
    /// if enabled, the best-effort sitemap seeder (depth 1).
    async fn seed(&self) {
        for seed in &self.config.seed_urls {
            match Url::parse(seed) {
                Ok(url) => self.frontier.push(normalize_url(&url), 0.0, 0),
                Err(e) => warn!(seed, error = %e, "dropping malformed seed url"),
            }
        }

        if !self.config.enable_sitemap_seeding {
            return;
        }

        let mut hosts = std::collections::HashSet::new();
        for seed in &self.config.seed_urls {
            if let Ok(url) = Url::parse(seed) {
                if let Some(host) = url.host_str() {
                    hosts.insert(host.to_string());
                }
            }
        }

        for host in hosts {
            let discovered = SitemapSeeder::discover(&self.fetcher, &host).await;
            for url in discovered {
                self.frontier.push(normalize_url(&url), 0.0, 1);
            }
        }
    }

    /// Runs the crawl to completion: seeds the frontier, dispatches the
    /// worker pool, and flushes the result sink. Installs a Ctrl-C handler
    /// that stops new dispatch and lets in-flight fetches finish or time out.
    pub async fn run(self: Arc<Self>) -> riptide_types::Result<Vec<PageRecord>> {
        if !self.proxies.is_empty() {
            self.proxies.revalidate(&self.fetcher).await;
        }
        self.seed().await;

        let engine = self.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("cancellation requested, draining in-flight work");
                engine.cancelled.store(true, Ordering::SeqCst);
            }
        });

        let mut workers = Vec::with_capacity(self.config.concurrency);
        for id in 0..self.config.concurrency {
            let engine = self.clone();
            workers.push(tokio::spawn(async move { engine.worker_loop(id).await }));
        }
        for worker in workers {
            let _ = worker.await;
        }

        let results = self.results.lock().await.clone();
        info!(pages = results.len(), "crawl finished");
        Ok(results)
    }

    async fn worker_loop(&self, worker_id: usize) {
        loop {
            if self.cancelled.load(Ordering::SeqCst) {
                return;
            }
            let Some(entry) = self.frontier.pop() else {
                // No work right now. Distinguish "done" from "momentarily
                // starved while siblings are fetching" with a short sleep;
                // exit once truly idle.
                tokio::time::sleep(Duration::from_millis(50)).await;
                if self.frontier.is_empty() {
                    return;
                }
                continue;
            };
            self.process(worker_id, entry).await;
        }
    }

    /// Atomically claims one slot against the host's accept budget. The
    /// check and increment happen under the same `DashMap` shard lock, so
    /// concurrent workers racing on the same host cannot both observe room
    /// under the cap. Callers that fail to turn the reservation into an
    /// accepted record must call `release_host_slot`.
    fn reserve_host_slot(&self, host: &str) -> bool {
        let mut count = self.host_accepted.entry(host.to_string()).or_insert(0);
        if *count >= self.config.max_urls_per_host {
            false
        } else {
            *count += 1;
            true
        }
    }

    fn release_host_slot(&self, host: &str) {
        if let Some(mut count) = self.host_accepted.get_mut(host) {
            *count = count.saturating_sub(1);
        }
    }

    #[instrument(skip(self), fields(worker = worker_id, url = %entry.url))]
    async fn process(&self, worker_id: usize, entry: crate::frontier::FrontierEntry) {
        let url = entry.url;
        let depth = entry.depth;

        if depth > self.config.max_depth {
            debug!("dropped: exceeds max_depth");
            return;
        }

        let Some(host) = url.host_str().map(str::to_string) else {
            return;
        };

        if !self.reserve_host_slot(&host) {
            debug!(host, "dropped: host budget exhausted");
            return;
        }

        if !self.robots.can_fetch(&self.fetcher, &url).await {
            debug!(host, "robots.txt denies this url");
            self.release_host_slot(&host);
            return;
        }

        self.rate_limiter.wait(&host).await;

        let proxy = self.proxies.get();
        let fetch_result = self.fetcher.fetch(url.as_str(), proxy.as_deref()).await;

        let response = match fetch_result {
            Ok(resp) => {
                self.rate_limiter.update(&host, true);
                resp
            }
            Err(e) => {
                self.rate_limiter.update(&host, false);
                warn!(host, error = %e, "fetch failed");
                self.release_host_slot(&host);
                return;
            }
        };

        if self.dedup.is_duplicate(&response.body) {
            debug!("duplicate content, skipping");
            self.release_host_slot(&host);
            return;
        }

        let html = String::from_utf8_lossy(&response.body).into_owned();

        let Some(mut record) = self.extractor.build_page_record(&html, &url) else {
            debug!("extraction failed");
            self.release_host_slot(&host);
            return;
        };

        let score = {
            let mut learner = self.learner.lock().await;
            let prediction = learner.predict(&record.text);
            learner.self_train(&record.text);
            prediction
        };
        record.relevance_score = score;

        self.scorer.record_visit(&host);
        self.results.lock().await.push(record.clone());
        info!(worker = worker_id, url = %url, score, "accepted page");

        let links = self.extractor.extract_links(&html, &url);
        let ctx = ScoreContext {
            referring_text: Some(record.text.as_str()),
        };
        for link in links {
            let normalized = normalize_url(&link);
            if normalized.scheme() != "http" && normalized.scheme() != "https" {
                continue;
            }
            if self.frontier.contains(&normalized) {
                continue;
            }
            let priority = self.scorer.score(&normalized, &ctx);
            self.frontier.push(normalized, priority, depth + 1);
        }
    }
}
