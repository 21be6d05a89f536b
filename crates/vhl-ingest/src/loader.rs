//! Loading a registry extract end to end.

use std::path::Path;

use polars::prelude::DataFrame;
use tracing::info;

use vhl_model::columns::{DERIVATION_SOURCES, OUTCOME, STRATUM_ID};

use crate::coerce::coerce_numeric_columns;
use crate::derive::derive_covariates;
use crate::error::{IngestError, Result};
use crate::reader::read_csv_text;

/// Fails with [`IngestError::MissingColumn`] on the first required column the
/// table lacks. Names are matched exactly.
pub fn require_columns(df: &DataFrame, required: &[&str], path: &Path) -> Result<()> {
    let present = df.get_column_names();
    for column in required {
        if !present.iter().any(|name| name.as_str() == *column) {
            return Err(IngestError::MissingColumn {
                column: (*column).to_string(),
                path: path.to_path_buf(),
            });
        }
    }
    Ok(())
}

/// Reads the extract at `path`, coerces covariates to numeric, and derives
/// `treat_cat` and `HighRCH`.
///
/// The returned table is never modified afterwards; every predictor fit
/// works on its own projection of it.
pub fn load_dataset(path: &Path) -> Result<DataFrame> {
    let raw = read_csv_text(path)?;
    require_columns(&raw, &[STRATUM_ID, OUTCOME], path)?;
    require_columns(&raw, &DERIVATION_SOURCES, path)?;

    let coerced = coerce_numeric_columns(raw)?;
    let df = derive_covariates(coerced)?;

    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "dataset loaded"
    );
    Ok(df)
}
