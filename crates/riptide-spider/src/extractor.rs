//! # Content Extractor
//!
//! Modular content extraction trait enabling pluggable extraction strategies.
//! The scheduler depends only on `ContentExtractor`; `BasicExtractor` is the
//! default, dependency-free implementation shipped with the crate.
//!
//! ```rust
//! use riptide_spider::extractor::{ContentExtractor, BasicExtractor};
//! use url::Url;
//!
//! let extractor = BasicExtractor;
//! let base_url = Url::parse("https://example.com").unwrap();
//! let html = r#"<a href="/page1">Link</a>"#;
//! let links = extractor.extract_links(html, &base_url);
//! assert_eq!(links.len(), 1);
//! ```

use riptide_types::PageRecord;
use url::Url;

/// All extractors must be `Send + Sync` for concurrent use by the scheduler.
pub trait ContentExtractor: Send + Sync {
    /// Extracts absolute links from HTML, resolved against `base_url`.
    /// Invalid URLs are silently skipped.
    fn extract_links(&self, html: &str, base_url: &Url) -> Vec<Url>;

    /// Extracts plain text content, or `None` if nothing usable remains.
    fn extract_text(&self, html: &str) -> Option<String>;

    /// Strategy identifier for logs and metrics.
    fn strategy_name(&self) -> &'static str;
}

/// Regex-based HTML extractor: title tag, tag-stripped text, truncated
/// summary, and frequency-ranked keywords. No external parser dependency.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicExtractor;

impl BasicExtractor {
    const SUMMARY_LEN: usize = 280;
    const MAX_KEYWORDS: usize = 10;

    fn extract_title(html: &str) -> Option<String> {
        let re = regex::Regex::new(r"(?is)<title[^>]*>(.*?)</title>").ok()?;
        re.captures(html)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn summarize(text: &str) -> Option<String> {
        if text.is_empty() {
            return None;
        }
        if text.chars().count() <= Self::SUMMARY_LEN {
            return Some(text.to_string());
        }
        let truncated: String = text.chars().take(Self::SUMMARY_LEN).collect();
        Some(format!("{}...", truncated.trim_end()))
    }

    fn top_keywords(text: &str) -> Vec<String> {
        let mut counts: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
        for word in text.split_whitespace() {
            let cleaned: String = word
                .chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase();
            if cleaned.len() > 3 {
                *counts.entry(cleaned).or_insert(0) += 1;
            }
        }
        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked
            .into_iter()
            .take(Self::MAX_KEYWORDS)
            .map(|(word, _)| word)
            .collect()
    }

    /// Builds a full `PageRecord` from a fetched page's HTML, or `None` if
    /// extraction fails (no usable text content).
    pub fn build_page_record(&self, html: &str, url: &Url) -> Option<PageRecord> {
        let text = self.extract_text(html)?;
        let title = Self::extract_title(html).unwrap_or_else(|| url.to_string());
        let summary = Self::summarize(&text);
        let keywords = Self::top_keywords(&text);

        let mut record = PageRecord::new(url.to_string(), title, text);
        record.summary = summary;
        record.keywords = keywords;
        Some(record)
    }
}

impl ContentExtractor for BasicExtractor {
    fn extract_links(&self, html: &str, base_url: &Url) -> Vec<Url> {
        let link_regex = match regex::Regex::new(r#"href\s*=\s*["']([^"']+)["']"#) {
            Ok(re) => re,
            Err(_) => return Vec::new(),
        };

        let mut links = Vec::new();
        for cap in link_regex.captures_iter(html) {
            if let Some(link_str) = cap.get(1) {
                if let Ok(url) = base_url.join(link_str.as_str()) {
                    links.push(url);
                }
            }
        }
        links
    }

    fn extract_text(&self, html: &str) -> Option<String> {
        let mut text = String::new();
        let mut in_tag = false;

        for ch in html.chars() {
            match ch {
                '<' => in_tag = true,
                '>' => in_tag = false,
                c if !in_tag && !c.is_control() => text.push(c),
                _ => {}
            }
        }

        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    fn strategy_name(&self) -> &'static str {
        "basic"
    }
}

/// No-op extractor for spider-only mode (pure URL discovery).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpExtractor;

impl ContentExtractor for NoOpExtractor {
    fn extract_links(&self, _html: &str, _base_url: &Url) -> Vec<Url> {
        Vec::new()
    }

    fn extract_text(&self, _html: &str) -> Option<String> {
        None
    }

    fn strategy_name(&self) -> &'static str {
        "noop"
    }
}
