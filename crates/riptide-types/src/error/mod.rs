//! Error types for the crawler engine.

pub mod riptide_error;

// Re-export for convenience
pub use riptide_error::{Result, RiptideError};
