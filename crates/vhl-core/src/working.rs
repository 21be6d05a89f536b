//! Per-predictor working subsets.

use std::collections::HashMap;

use polars::prelude::DataFrame;

use vhl_model::columns::{OUTCOME, STRATUM_ID};

use crate::error::Result;
use crate::frame::{float_values, text_values};
use crate::strata::outcome_flag;

/// Complete observations of one matched set for one predictor.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedSet {
    pub id: String,
    pub outcomes: Vec<bool>,
    pub values: Vec<f64>,
}

impl MatchedSet {
    pub fn new(id: impl Into<String>, outcomes: Vec<bool>, values: Vec<f64>) -> Self {
        debug_assert_eq!(outcomes.len(), values.len());
        Self {
            id: id.into(),
            outcomes,
            values,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub fn cases(&self) -> usize {
        self.outcomes.iter().filter(|case| **case).count()
    }

    /// More than one distinct predictor value among the rows.
    pub fn varies(&self) -> bool {
        match self.values.split_first() {
            Some((first, rest)) => rest.iter().any(|v| v != first),
            None => false,
        }
    }
}

/// Rows of `(case, match_id, predictor)` with no missing value, grouped by
/// matched set in first-seen order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkingSet {
    pub sets: Vec<MatchedSet>,
}

impl WorkingSet {
    pub fn new(sets: Vec<MatchedSet>) -> Self {
        Self { sets }
    }

    /// Projects `df` onto the outcome, stratum, and `predictor` columns and
    /// drops every row missing any of the three.
    pub fn from_frame(df: &DataFrame, predictor: &str) -> Result<Self> {
        let ids = text_values(df, STRATUM_ID)?;
        let outcomes = float_values(df, OUTCOME)?;
        let values = float_values(df, predictor)?;

        let mut sets: Vec<MatchedSet> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for ((id, outcome), value) in ids.into_iter().zip(outcomes).zip(values) {
            let (Some(id), Some(case), Some(value)) = (id, outcome_flag(outcome), value) else {
                continue;
            };
            let slot = match index.get(&id) {
                Some(slot) => *slot,
                None => {
                    index.insert(id.clone(), sets.len());
                    sets.push(MatchedSet::new(id, Vec::new(), Vec::new()));
                    sets.len() - 1
                }
            };
            sets[slot].outcomes.push(case);
            sets[slot].values.push(value);
        }
        Ok(Self { sets })
    }

    /// Distinct matched sets contributing rows.
    pub fn strata(&self) -> usize {
        self.sets.len()
    }

    /// Rows across all matched sets.
    pub fn observations(&self) -> usize {
        self.sets.iter().map(MatchedSet::len).sum()
    }

    /// At least one matched set has more than one distinct predictor value.
    pub fn has_within_stratum_variation(&self) -> bool {
        self.sets.iter().any(MatchedSet::varies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    #[test]
    fn listwise_deletion_is_predictor_local() {
        let df = DataFrame::new(vec![
            Series::new(STRATUM_ID.into(), vec!["a", "a", "a", "b", "b", "b"]).into_column(),
            Series::new(OUTCOME.into(), vec!["1", "0", "0", "1", "0", "0"]).into_column(),
            Series::new(
                "p".into(),
                vec![Some(1.0), None, Some(0.0), None, None, None],
            )
            .into_column(),
            Series::new(
                "q".into(),
                vec![Some(1.0), Some(1.0), Some(1.0), Some(0.0), Some(1.0), Some(0.0)],
            )
            .into_column(),
        ])
        .unwrap();

        let p = WorkingSet::from_frame(&df, "p").unwrap();
        assert_eq!(p.strata(), 1);
        assert_eq!(p.observations(), 2);
        assert_eq!(p.sets[0], MatchedSet::new("a", vec![true, false], vec![1.0, 0.0]));
        assert!(p.has_within_stratum_variation());

        let q = WorkingSet::from_frame(&df, "q").unwrap();
        assert_eq!(q.strata(), 2);
        assert_eq!(q.observations(), 6);
        assert!(!q.sets[0].varies());
        assert!(q.sets[1].varies());
    }

    #[test]
    fn constant_predictor_has_no_variation() {
        let ws = WorkingSet::new(vec![
            MatchedSet::new("a", vec![true, false, false], vec![0.0, 0.0, 0.0]),
            MatchedSet::new("b", vec![true, false, false], vec![1.0, 1.0, 1.0]),
        ]);
        assert!(!ws.has_within_stratum_variation());
        assert_eq!(ws.sets[0].cases(), 1);
    }
}
