//! Link scoring: assigns a numeric priority to a candidate URL.
//!
//! Deterministic given fixed inputs and scorer state; never consults the
//! relevance learner (no cyclic dependency between scoring and learning).

use dashmap::DashMap;
use std::collections::HashMap;
use url::Url;

/// Context available when scoring a candidate link: the text of the page
/// that linked to it (when already fetched), used both for the topical
/// term-frequency signal and for the candidate's own keyword matches.
pub struct ScoreContext<'a> {
    pub referring_text: Option<&'a str>,
}

pub trait LinkScorer: Send + Sync {
    fn score(&self, url: &Url, ctx: &ScoreContext<'_>) -> f64;
}

/// Lexical implementation of the dual-mode scorer: `topical` is a
/// term-frequency sum over `target_keywords` rather than an embedding
/// similarity, since no embedding model ships with this crate.
pub struct LexicalScorer {
    priority_rules: HashMap<String, i64>,
    keyword_weights: HashMap<String, i64>,
    content_type_weights: HashMap<String, i64>,
    target_keywords: Vec<String>,
    domain_visits: DashMap<String, usize>,
}

impl LexicalScorer {
    pub fn new(
        priority_rules: HashMap<String, i64>,
        keyword_weights: HashMap<String, i64>,
        content_type_weights: HashMap<String, i64>,
        target_keywords: Vec<String>,
    ) -> Self {
        Self {
            priority_rules,
            keyword_weights,
            content_type_weights,
            target_keywords,
            domain_visits: DashMap::new(),
        }
    }

    /// Records that `host` has now been crawled once; affects future
    /// `domain_diversity` scoring for sibling links.
    pub fn record_visit(&self, host: &str) {
        *self.domain_visits.entry(host.to_string()).or_insert(0) += 1;
    }

    fn base(&self, host: &str) -> f64 {
        self.priority_rules.get(host).copied().unwrap_or(0) as f64
    }

    fn topical(&self, text: &str) -> f64 {
        if self.target_keywords.is_empty() || text.is_empty() {
            return 0.0;
        }
        let lower = text.to_lowercase();
        let hits = self
            .target_keywords
            .iter()
            .filter(|kw| lower.contains(&kw.to_lowercase()))
            .count();
        10.0 * (hits as f64 / self.target_keywords.len() as f64)
    }

    fn keyword(&self, text: &str) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        let lower = text.to_lowercase();
        self.keyword_weights
            .iter()
            .map(|(kw, weight)| {
                let freq = lower.matches(&kw.to_lowercase()).count();
                freq as f64 * (*weight as f64)
            })
            .sum()
    }

    fn content_type(&self, path: &str) -> f64 {
        self.content_type_weights
            .iter()
            .filter(|(ct, _)| path.contains(ct.as_str()))
            .map(|(_, weight)| *weight as f64)
            .sum()
    }

    fn domain_diversity(&self, host: &str) -> f64 {
        match self.domain_visits.get(host).map(|v| *v) {
            None | Some(0) => 3.0,
            Some(n) if n < 5 => 1.0,
            _ => 0.0,
        }
    }

    fn depth_penalty(&self, url: &Url) -> f64 {
        let depth = url.as_str().matches('/').count();
        -0.5 * depth as f64
    }
}

impl LinkScorer for LexicalScorer {
    fn score(&self, url: &Url, ctx: &ScoreContext<'_>) -> f64 {
        let host = url.host_str().unwrap_or_default();
        let text = ctx.referring_text.unwrap_or_default();

        let total = self.base(host)
            + self.topical(text)
            + self.keyword(text)
            + self.content_type(url.path())
            + self.domain_diversity(host)
            + self.depth_penalty(url);

        total.max(0.0)
    }
}
