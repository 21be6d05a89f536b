//! Derived covariates.

use polars::prelude::{DataFrame, NamedFrom, Series};

use vhl_model::columns::{COMBINED_TREATMENTS, HIGH_RCH, RCH_AT_BASELINE, TREAT_CAT};

use crate::error::Result;

/// Collapses a count of ocular treatments into 0 / 1 / 2.
///
/// 0 treatments → 0, up to 2 treatments → 1, 3 or more → 2.
pub fn treatment_category(count: Option<f64>) -> Option<f64> {
    let count = count.filter(|c| !c.is_nan())?;
    if count == 0.0 {
        Some(0.0)
    } else if count <= 2.0 {
        Some(1.0)
    } else {
        Some(2.0)
    }
}

/// Adds `treat_cat` and `HighRCH` to an already-coerced table.
///
/// The source columns must exist and be `Float64`.
pub fn derive_covariates(mut df: DataFrame) -> Result<DataFrame> {
    let treat_cat: Vec<Option<f64>> = df
        .column(COMBINED_TREATMENTS)?
        .as_materialized_series()
        .f64()?
        .iter()
        .map(treatment_category)
        .collect();
    df.with_column(Series::new(TREAT_CAT.into(), treat_cat))?;

    // RCH_at_baseline is already coded 0/1 (≥ 3 lesions).
    let high_rch = df
        .column(RCH_AT_BASELINE)?
        .as_materialized_series()
        .clone()
        .with_name(HIGH_RCH.into());
    df.with_column(high_rch)?;

    Ok(df)
}
