//! Matched-set filtering.
//!
//! A matched set is kept only when it has exactly the configured number of
//! rows and exactly the configured number of cases. Anything else (an
//! incomplete match, an extra control, a set with two cases or with a
//! numeric outcome other than 0/1) is dropped whole. No repair is attempted.
//! A missing outcome counts toward the row total but not the case total.
//!
//! Exclusion is routine for registry extracts and is logged at debug level
//! only.

use std::collections::HashMap;

use polars::prelude::{BooleanChunked, DataFrame, NewChunkedArray};
use tracing::{debug, info};

use vhl_model::StratumInvariant;
use vhl_model::columns::{OUTCOME, STRATUM_ID};

use crate::error::Result;
use crate::frame::{float_values, text_values};

/// Counts from one filtering pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StratumSummary {
    /// Distinct matched-set identifiers in the input.
    pub total: usize,
    pub kept: usize,
    /// Sets dropped for having the wrong number of rows.
    pub wrong_size: usize,
    /// Right size, but the wrong number of cases or an outcome other than 0/1.
    pub wrong_cases: usize,
    /// Rows without a matched-set identifier.
    pub unassigned_rows: usize,
}

impl StratumSummary {
    pub fn dropped(&self) -> usize {
        self.wrong_size + self.wrong_cases
    }
}

#[derive(Debug, Default)]
struct Tally {
    rows: usize,
    cases: usize,
    invalid_outcome: bool,
}

/// Interprets an outcome cell. Only exact 0 and 1 are valid.
pub fn outcome_flag(value: Option<f64>) -> Option<bool> {
    match value {
        Some(v) if v == 1.0 => Some(true),
        Some(v) if v == 0.0 => Some(false),
        _ => None,
    }
}

/// Keeps the rows of every matched set that satisfies `invariant`.
///
/// Retained rows keep all columns and their original order.
pub fn filter_strata(
    df: &DataFrame,
    invariant: StratumInvariant,
) -> Result<(DataFrame, StratumSummary)> {
    let ids = text_values(df, STRATUM_ID)?;
    let outcomes = float_values(df, OUTCOME)?;

    // First-seen order keeps the debug log stable across runs.
    let mut order: Vec<&str> = Vec::new();
    let mut tallies: HashMap<&str, Tally> = HashMap::new();
    let mut summary = StratumSummary::default();

    for (id, outcome) in ids.iter().zip(&outcomes) {
        let Some(id) = id.as_deref() else {
            summary.unassigned_rows += 1;
            continue;
        };
        let tally = tallies.entry(id).or_insert_with(|| {
            order.push(id);
            Tally::default()
        });
        tally.rows += 1;
        match (outcome, outcome_flag(*outcome)) {
            (_, Some(true)) => tally.cases += 1,
            (None, _) | (_, Some(false)) => {}
            (Some(_), None) => tally.invalid_outcome = true,
        }
    }

    summary.total = order.len();
    let mut accepted: HashMap<&str, bool> = HashMap::with_capacity(order.len());
    for id in &order {
        let tally = &tallies[id];
        let keep = !tally.invalid_outcome && invariant.accepts(tally.rows, tally.cases);
        if keep {
            summary.kept += 1;
        } else {
            if tally.rows != invariant.size {
                summary.wrong_size += 1;
            } else {
                summary.wrong_cases += 1;
            }
            debug!(
                match_id = %id,
                rows = tally.rows,
                cases = tally.cases,
                invalid_outcome = tally.invalid_outcome,
                "matched set excluded"
            );
        }
        accepted.insert(*id, keep);
    }

    let mask: Vec<bool> = ids
        .iter()
        .map(|id| {
            id.as_deref()
                .and_then(|id| accepted.get(id).copied())
                .unwrap_or(false)
        })
        .collect();
    let filtered = df.filter(&BooleanChunked::from_slice("keep".into(), &mask))?;

    info!(
        total = summary.total,
        kept = summary.kept,
        wrong_size = summary.wrong_size,
        wrong_cases = summary.wrong_cases,
        rows = filtered.height(),
        invariant = %invariant,
        "matched sets filtered"
    );
    Ok((filtered, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    fn frame(ids: &[Option<&str>], cases: &[&str]) -> DataFrame {
        let x: Vec<f64> = (0..ids.len()).map(|i| i as f64).collect();
        DataFrame::new(vec![
            Series::new(STRATUM_ID.into(), ids.to_vec()).into_column(),
            Series::new(OUTCOME.into(), cases.to_vec()).into_column(),
            Series::new("x".into(), x).into_column(),
        ])
        .unwrap()
    }

    #[test]
    fn keeps_only_complete_triplets() {
        let df = frame(
            &[
                Some("a"),
                Some("a"),
                Some("a"),
                Some("b"),
                Some("b"),
                Some("c"),
                Some("c"),
                Some("c"),
                Some("d"),
                Some("d"),
                Some("d"),
                None,
            ],
            &["1", "0", "0", "1", "0", "1", "1", "0", "0", "1", "0", "1"],
        );

        let (kept, summary) = filter_strata(&df, StratumInvariant::TRIPLET).unwrap();

        assert_eq!(
            summary,
            StratumSummary {
                total: 4,
                kept: 2,
                wrong_size: 1,
                wrong_cases: 1,
                unassigned_rows: 1,
            }
        );
        assert_eq!(summary.dropped(), 2);
        assert_eq!(kept.height(), 6);
        let x: Vec<Option<f64>> = kept
            .column("x")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .iter()
            .collect();
        assert_eq!(
            x,
            vec![Some(0.0), Some(1.0), Some(2.0), Some(8.0), Some(9.0), Some(10.0)]
        );
    }

    #[test]
    fn non_binary_outcome_drops_the_set() {
        let df = frame(
            &[Some("a"), Some("a"), Some("a")],
            &["1", "0", "2"],
        );
        let (kept, summary) = filter_strata(&df, StratumInvariant::TRIPLET).unwrap();
        assert_eq!(kept.height(), 0);
        assert_eq!(summary.wrong_cases, 1);
    }

    #[test]
    fn missing_outcome_counts_as_a_row_but_not_a_case() {
        let df = frame(
            &[Some("a"), Some("a"), Some("a"), Some("b"), Some("b"), Some("b")],
            &["1", "0", "Na", "0", "", "0"],
        );
        let (kept, summary) = filter_strata(&df, StratumInvariant::TRIPLET).unwrap();
        assert_eq!(kept.height(), 3);
        assert_eq!(summary.kept, 1);
        assert_eq!(summary.wrong_cases, 1);
    }

    #[test]
    fn outcome_flag_accepts_only_zero_and_one() {
        assert_eq!(outcome_flag(Some(1.0)), Some(true));
        assert_eq!(outcome_flag(Some(0.0)), Some(false));
        assert_eq!(outcome_flag(Some(0.5)), None);
        assert_eq!(outcome_flag(None), None);
    }
}
