//! Error types for writing results.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing the result table.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Failed to create the output directory or file.
    #[error("failed to write {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize a CSV record.
    #[error("failed to write CSV {path}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn io_error_keeps_its_source() {
        let err = ReportError::Io {
            path: PathBuf::from("results/out.csv"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "failed to write results/out.csv");
        assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("denied"));
    }
}
