//! The crawl engine's configuration object: loading, env overrides, and
//! validation.

use crate::env::EnvConfigLoader;
use riptide_types::{Result, RiptideError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

fn default_concurrency() -> usize {
    16
}

fn default_max_depth() -> u32 {
    5
}

fn default_max_urls_per_host() -> usize {
    1000
}

fn default_user_agent() -> String {
    "riptide-crawler/0.9".to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

fn default_frontier_capacity() -> usize {
    100_000
}

fn default_true() -> bool {
    true
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

/// Output format for the structured logging subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// The crawl engine's full configuration, as loaded from TOML plus
/// environment overrides. Immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub seed_urls: Vec<String>,

    #[serde(default = "default_max_depth")]
    pub max_depth: u32,

    #[serde(default = "default_max_urls_per_host")]
    pub max_urls_per_host: usize,

    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default)]
    pub proxies: Vec<String>,

    #[serde(default)]
    pub priority_rules: HashMap<String, i64>,

    #[serde(default)]
    pub keyword_weights: HashMap<String, i64>,

    #[serde(default)]
    pub content_type_weights: HashMap<String, i64>,

    #[serde(default)]
    pub target_keywords: Vec<String>,

    pub output_file: String,

    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    #[serde(default = "default_frontier_capacity")]
    pub frontier_capacity: usize,

    #[serde(default = "default_true")]
    pub enable_sitemap_seeding: bool,

    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
}

impl EngineConfig {
    /// Loads a base configuration from a TOML file, then applies
    /// environment-variable overrides for operational knobs, then validates.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let mut config: EngineConfig = toml::from_str(&raw)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        let loader = EnvConfigLoader::new().with_prefix("RIPTIDE_");
        if let Some(ua) = loader.get_optional("USER_AGENT") {
            self.user_agent = ua;
        }
        if let Some(out) = loader.get_optional("OUTPUT_FILE") {
            self.output_file = out;
        }
        if let Ok(Some(n)) = loader.get_uint("CONCURRENCY") {
            self.concurrency = n;
        }
    }

    /// Validates the configuration, returning the first violation found.
    /// Invariant 8: this must run, and must fail, before any network I/O.
    pub fn validate(&self) -> Result<()> {
        if self.seed_urls.is_empty() {
            return Err(RiptideError::Configuration(
                "seed_urls must not be empty".into(),
            ));
        }
        for seed in &self.seed_urls {
            url::Url::parse(seed).map_err(|e| {
                RiptideError::Configuration(format!("invalid seed url {seed:?}: {e}"))
            })?;
        }
        if self.concurrency == 0 {
            return Err(RiptideError::Configuration(
                "concurrency must be positive".into(),
            ));
        }
        if self.max_urls_per_host == 0 {
            return Err(RiptideError::Configuration(
                "max_urls_per_host must be positive".into(),
            ));
        }
        if self.frontier_capacity == 0 {
            return Err(RiptideError::Configuration(
                "frontier_capacity must be positive".into(),
            ));
        }
        if self.output_file.trim().is_empty() {
            return Err(RiptideError::Configuration(
                "output_file must not be empty".into(),
            ));
        }
        let output_path = Path::new(&self.output_file);
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(RiptideError::Configuration(format!(
                    "output_file parent directory does not exist: {}",
                    parent.display()
                )));
            }
        }
        for proxy in &self.proxies {
            url::Url::parse(proxy).map_err(|e| {
                RiptideError::Configuration(format!("invalid proxy url {proxy:?}: {e}"))
            })?;
        }
        Ok(())
    }
}
