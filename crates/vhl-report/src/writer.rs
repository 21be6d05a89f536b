//! CSV output.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::{ReportError, Result};
use crate::table::ResultTable;

/// Formats a float the way the published tables have always shown it:
/// shortest round-trip digits, with `.0` kept on whole numbers.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return String::new();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let text = value.to_string();
    if text.contains(['.', 'e']) {
        text
    } else {
        format!("{text}.0")
    }
}

/// Writes `table` as CSV to any writer.
pub fn write_csv_to<W: Write>(table: &ResultTable, writer: W) -> csv::Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    csv.write_record(table.headers())?;
    for row in &table.rows {
        csv.write_record([
            row.predictor.clone(),
            format_float(row.odds_ratio),
            format_float(row.ci_low),
            format_float(row.ci_high),
            format_float(row.p_value),
            row.strata.to_string(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes `table` to `path`, creating parent directories as needed.
pub fn write_csv(table: &ResultTable, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ReportError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let file = File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv_to(table, file).map_err(|source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), rows = table.len(), "results written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_keep_a_decimal_point() {
        assert_eq!(format_float(1.0), "1.0");
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(2.73), "2.73");
        assert_eq!(format_float(0.0001), "0.0001");
        assert_eq!(format_float(12.0), "12.0");
        assert_eq!(format_float(f64::INFINITY), "inf");
        assert_eq!(format_float(f64::NAN), "");
    }
}
