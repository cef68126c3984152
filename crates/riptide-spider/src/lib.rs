//! # Riptide Spider
//!
//! The crawl engine for the RipTide topical crawler: frontier management,
//! politeness (rate limiting and robots.txt), proxying, deduplication,
//! extraction, link scoring, relevance learning, and sitemap seeding, bound
//! together by the scheduler's worker pool.
//!
//! - **riptide-spider**: crawling logic (this crate)
//! - **riptide-fetch**: HTTP/network layer
//! - **riptide-config**: configuration loading
//! - **riptide-types**: shared data model and error types

pub mod dedup;
pub mod extractor;
pub mod frontier;
pub mod learner;
pub mod proxy;
pub mod rate_limiter;
pub mod robots;
pub mod scheduler;
pub mod scorer;
pub mod sitemap;
pub mod types;

pub use dedup::{ContentFingerprint, DedupFilter};
pub use extractor::{BasicExtractor, ContentExtractor, NoOpExtractor};
pub use frontier::{Frontier, FrontierEntry};
pub use learner::RelevanceLearner;
pub use proxy::ProxyPool;
pub use rate_limiter::RateLimiter;
pub use robots::RobotsCache;
pub use scheduler::Engine;
pub use scorer::{LexicalScorer, LinkScorer, ScoreContext};
pub use sitemap::SitemapSeeder;
pub use types::normalize_url;
