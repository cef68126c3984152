//! Online relevance learner.
//!
//! A bag-of-words vocabulary that grows online, feeding a multinomial naive
//! Bayes classifier over {not-relevant=0, relevant=1}, updated incrementally
//! via running per-class token counts (no vocabulary refit needed). Labels
//! for training come from thresholding the learner's own prediction at 0.5 —
//! a self-training loop, intentionally preserved from the source behavior.
//!
//! Single-writer: the scheduler serializes all `update` calls through an
//! async mutex (see `Engine::learner`).

use std::collections::HashMap;

/// Threshold used to turn a prediction into a self-training label.
pub const SELF_TRAINING_THRESHOLD: f64 = 0.5;

#[derive(Default)]
struct ClassStats {
    /// Count of each token seen in documents of this class.
    token_counts: HashMap<String, u64>,
    /// Total tokens seen across all documents of this class (with Laplace
    /// smoothing denominator precomputed at predict time).
    total_tokens: u64,
    /// Number of documents labeled with this class.
    doc_count: u64,
}

/// Online multinomial-naive-Bayes relevance classifier over free text.
pub struct RelevanceLearner {
    vocabulary: HashMap<String, usize>,
    classes: [ClassStats; 2],
    trained: bool,
}

fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

impl RelevanceLearner {
    pub fn new() -> Self {
        Self {
            vocabulary: HashMap::new(),
            classes: [ClassStats::default(), ClassStats::default()],
            trained: false,
        }
    }

    /// Probability the text is "relevant" (class 1). Returns the neutral
    /// prior 0.5 before any training has occurred.
    pub fn predict(&self, text: &str) -> f64 {
        if !self.trained {
            return SELF_TRAINING_THRESHOLD;
        }

        let tokens = tokenize(text);
        let total_docs = (self.classes[0].doc_count + self.classes[1].doc_count) as f64;
        if total_docs == 0.0 {
            return SELF_TRAINING_THRESHOLD;
        }

        let vocab_size = self.vocabulary.len().max(1) as f64;
        let log_score = |class: &ClassStats| -> f64 {
            let prior = (class.doc_count as f64 / total_docs).max(1e-9).ln();
            let denom = class.total_tokens as f64 + vocab_size;
            let likelihood: f64 = tokens
                .iter()
                .map(|t| {
                    let count = *class.token_counts.get(t).unwrap_or(&0) as f64;
                    ((count + 1.0) / denom).ln()
                })
                .sum();
            prior + likelihood
        };

        let log_p0 = log_score(&self.classes[0]);
        let log_p1 = log_score(&self.classes[1]);

        // Normalize via the log-sum-exp trick to recover P(class=1).
        let max_log = log_p0.max(log_p1);
        let p0 = (log_p0 - max_log).exp();
        let p1 = (log_p1 - max_log).exp();
        p1 / (p0 + p1)
    }

    /// Incorporates one labeled example. The first call trains from scratch;
    /// subsequent calls extend the running counts in place (no vocabulary
    /// refit).
    pub fn update(&mut self, text: &str, label: u8) {
        let class_idx = if label == 0 { 0 } else { 1 };
        let tokens = tokenize(text);

        for token in &tokens {
            let next_id = self.vocabulary.len();
            self.vocabulary.entry(token.clone()).or_insert(next_id);
        }

        let class = &mut self.classes[class_idx];
        class.doc_count += 1;
        for token in tokens {
            *class.token_counts.entry(token).or_insert(0) += 1;
            class.total_tokens += 1;
        }

        self.trained = true;
    }

    /// Generates a self-training label by thresholding the current
    /// prediction, then applies it via `update`.
    pub fn self_train(&mut self, text: &str) {
        let predicted = self.predict(text);
        let label = if predicted >= SELF_TRAINING_THRESHOLD { 1 } else { 0 };
        self.update(text, label);
    }

    pub fn is_trained(&self) -> bool {
        self.trained
    }
}

impl Default for RelevanceLearner {
    fn default() -> Self {
        Self::new()
    }
}
