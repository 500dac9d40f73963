//! Error types for the TraderQoL host binary.
//!
//! [`EngineError`] is the top-level error type `main` propagates. It wraps
//! settings and database failures; the transform pass itself cannot fail.

use crate::database::LoadError;

/// Top-level error for the host binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The settings document could not be read or parsed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: traderqol_core::ConfigError,
    },

    /// The game database could not be loaded.
    #[error("database error: {source}")]
    Database {
        /// The underlying load error.
        #[from]
        source: LoadError,
    },

    /// The report could not be serialized.
    #[error("report error: {source}")]
    Report {
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}
