//! # RipTide Fetch
//!
//! HTTP/network layer for the crawler: a pooled, proxy-aware GET fetcher used
//! by the robots cache, sitemap seeder, and scheduler.

pub mod fetch;

pub use fetch::{FetchResponse, Fetcher};
