//! Shared data model for crawl results.
//!
//! These types cross the crate boundary between the spider engine, the
//! result sink, and the CLI, so they live here rather than in
//! `riptide-spider`.

use serde::{Deserialize, Serialize};

/// A single crawled page, ready for the result sink.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageRecord {
    pub url: String,
    pub title: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<String>,
    pub relevance_score: f64,
}

impl PageRecord {
    pub fn new(url: impl Into<String>, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            text: text.into(),
            summary: None,
            keywords: Vec::new(),
            authors: Vec::new(),
            publish_date: None,
            relevance_score: 0.5,
        }
    }
}
