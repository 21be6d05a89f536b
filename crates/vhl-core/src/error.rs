//! Error types for filtering and fitting.

use thiserror::Error;

/// Table-level failures. Per-predictor fitting problems are not errors;
/// they are reported through [`PredictorOutcome`](vhl_model::PredictorOutcome).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Column not found in DataFrame.
    #[error("column '{column}' not found in DataFrame")]
    ColumnNotFound { column: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for CoreError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
