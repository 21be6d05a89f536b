//! Numeric coercion of covariate columns.

use polars::prelude::{Column, DataFrame, DataType, NamedFrom, PlSmallStr, Series};
use tracing::debug;

use vhl_model::columns::is_identifier_column;

use crate::error::Result;

/// String literals the registry uses for "not available".
pub const MISSING_SENTINELS: [&str; 3] = ["Na", "NA", "na"];

/// Parses one cell as a number.
///
/// Empty cells, [`MISSING_SENTINELS`], unparseable text, and non-finite
/// values all map to `None`.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || MISSING_SENTINELS.contains(&trimmed) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn coerce_column(column: &Column) -> Result<(Series, usize)> {
    let name = column.name().clone();
    let series = column.as_materialized_series();
    if series.dtype() == &DataType::Float64 {
        return Ok((series.clone(), 0));
    }
    let as_text = series.cast(&DataType::String)?;
    let mut coerced = 0usize;
    let values: Vec<Option<f64>> = as_text
        .str()?
        .iter()
        .map(|cell| {
            let parsed = cell.and_then(parse_numeric);
            if parsed.is_none() && cell.is_some_and(|c| !c.trim().is_empty()) {
                coerced += 1;
            }
            parsed
        })
        .collect();
    Ok((Series::new(name, values), coerced))
}

/// Converts every non-identifier column to `Float64`.
///
/// Identifier columns (`match_id`, `case`, `subject_id`, any case) are left
/// exactly as read.
pub fn coerce_numeric_columns(mut df: DataFrame) -> Result<DataFrame> {
    let names: Vec<PlSmallStr> = df.get_column_names().into_iter().cloned().collect();
    for name in names {
        if is_identifier_column(name.as_str()) {
            continue;
        }
        let (series, coerced) = coerce_column(df.column(name.as_str())?)?;
        if coerced > 0 {
            debug!(column = %name, coerced, "non-numeric cells set to missing");
        }
        df.with_column(series)?;
    }
    Ok(df)
}
