//! Riptide CLI library
//!
//! Thin wiring between the command line, the configuration loader, and the
//! crawl engine. The binary entry point lives in `main.rs`; this library
//! exists so integration tests can exercise the same `run` path.

pub mod sink;

/// CLI version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
