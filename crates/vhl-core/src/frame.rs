//! Column extraction helpers.

use polars::prelude::{DataFrame, DataType};

use crate::error::{CoreError, Result};

pub(crate) fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|c| c.as_str() == name)
}

fn require(df: &DataFrame, name: &str) -> Result<()> {
    if has_column(df, name) {
        Ok(())
    } else {
        Err(CoreError::ColumnNotFound {
            column: name.to_string(),
        })
    }
}

/// Column values as text keys. Numeric identifiers are rendered by Polars.
pub(crate) fn text_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    require(df, name)?;
    let cast = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    let values = cast
        .str()?
        .iter()
        .map(|v| v.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string))
        .collect();
    Ok(values)
}

/// Column values as numbers. Text that does not parse becomes `None`.
pub(crate) fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    require(df, name)?;
    let cast = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    let values = cast
        .f64()?
        .iter()
        .map(|v| v.filter(|x| x.is_finite()))
        .collect();
    Ok(values)
}
