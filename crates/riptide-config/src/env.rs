//! Environment variable loading for configuration overrides.
//!
//! A handful of operational knobs (`user_agent`, `concurrency`, `output_file`)
//! may be overridden at runtime without editing the TOML file, following the
//! common pattern of layering env vars on top of a base config file.

use std::collections::HashMap;
use std::env;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnvError {
    #[error("environment variable not found: {var}")]
    NotFound { var: String },

    #[error("invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Environment configuration loader scoped to a variable prefix.
pub struct EnvConfigLoader {
    prefix: Option<String>,
    defaults: HashMap<String, String>,
}

impl EnvConfigLoader {
    pub fn new() -> Self {
        Self {
            prefix: None,
            defaults: HashMap::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn default(mut self, var: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.insert(var.into(), value.into());
        self
    }

    fn make_var_name(&self, var: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, var.to_uppercase()),
            None => var.to_uppercase(),
        }
    }

    pub fn get_optional(&self, var: &str) -> Option<String> {
        let full_var = self.make_var_name(var);
        env::var(&full_var).ok().or_else(|| self.defaults.get(var).cloned())
    }

    pub fn get_uint(&self, var: &str) -> Result<Option<usize>, EnvError> {
        match self.get_optional(var) {
            None => Ok(None),
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|e| EnvError::InvalidValue {
                    var: self.make_var_name(var),
                    reason: format!("not an unsigned integer: {}", e),
                }),
        }
    }
}

impl Default for EnvConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
