//! Configuration loading and validation for the crawl engine.
//!
//! The engine's configuration is a single `EngineConfig` object, loaded from
//! a TOML file with a small set of environment-variable overrides for
//! operational knobs. Loading validates the configuration fully before any
//! network I/O happens.

mod engine;
mod env;

pub use engine::{EngineConfig, LogFormat};
pub use env::{EnvConfigLoader, EnvError};
