//! Error types for analysis configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating an [`AnalysisConfig`](crate::AnalysisConfig).
#[derive(Debug, Error)]
pub enum ModelError {
    /// Failed to read the configuration file.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The predictor registry is empty.
    #[error("predictor registry is empty")]
    EmptyRegistry,

    /// The same predictor key appears twice in the registry.
    #[error("predictor '{key}' is listed more than once")]
    DuplicatePredictor { key: String },

    /// Stratum invariant cannot be satisfied by a matched set.
    #[error("invalid stratum invariant: {cases} case(s) in sets of {size}")]
    InvalidInvariant { size: usize, cases: usize },

    /// Output count column name is blank.
    #[error("count column name must not be empty")]
    EmptyCountColumn,

    /// Solver setting outside its valid range.
    #[error("invalid solver setting {field}: {reason}")]
    InvalidSolver { field: &'static str, reason: String },
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ModelError>;
