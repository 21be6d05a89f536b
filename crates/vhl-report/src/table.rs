//! The published result table.

use vhl_model::{PredictorOutcome, PredictorReport};

use crate::rounding::{P_VALUE_DECIMALS, RATIO_DECIMALS, round_half_even};

/// Header of the predictor label column.
pub const PREDICTOR_HEADER: &str = "Predictor";
/// Headers of the estimate columns, in output order.
pub const ESTIMATE_HEADERS: [&str; 4] = ["OR", "CI_low", "CI_high", "p"];

/// One fitted predictor, rounded for publication.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub predictor: String,
    pub odds_ratio: f64,
    pub ci_low: f64,
    pub ci_high: f64,
    pub p_value: f64,
    /// Matched sets that contributed to the fit.
    pub strata: usize,
}

/// Rows in ascending p-value order plus the name of the count column.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    pub count_column: String,
    pub rows: Vec<ResultRow>,
}

impl ResultTable {
    /// Builds the table from per-predictor reports in registry order.
    ///
    /// Only fitted predictors produce a row. Sorting by the rounded p-value
    /// is stable, so equal p-values keep registry order.
    pub fn assemble(reports: &[PredictorReport], count_column: impl Into<String>) -> Self {
        let mut rows: Vec<ResultRow> = reports
            .iter()
            .filter_map(|report| match &report.outcome {
                PredictorOutcome::Fitted(fit) => Some(ResultRow {
                    predictor: report.predictor.label.clone(),
                    odds_ratio: round_half_even(fit.odds_ratio, RATIO_DECIMALS),
                    ci_low: round_half_even(fit.ci_low, RATIO_DECIMALS),
                    ci_high: round_half_even(fit.ci_high, RATIO_DECIMALS),
                    p_value: round_half_even(fit.p_value, P_VALUE_DECIMALS),
                    strata: fit.strata,
                }),
                _ => None,
            })
            .collect();
        rows.sort_by(|a, b| a.p_value.total_cmp(&b.p_value));
        Self {
            count_column: count_column.into(),
            rows,
        }
    }

    /// Column headers in output order.
    pub fn headers(&self) -> Vec<&str> {
        let mut headers = Vec::with_capacity(ESTIMATE_HEADERS.len() + 2);
        headers.push(PREDICTOR_HEADER);
        headers.extend(ESTIMATE_HEADERS);
        headers.push(self.count_column.as_str());
        headers
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vhl_model::{FitResult, PredictorSpec};

    fn fitted(label: &str, odds_ratio: f64, p_value: f64) -> PredictorReport {
        PredictorReport {
            predictor: PredictorSpec::new(label.to_lowercase(), label),
            outcome: PredictorOutcome::Fitted(FitResult {
                coefficient: odds_ratio.ln(),
                std_error: 0.5,
                odds_ratio,
                ci_low: odds_ratio / 2.0,
                ci_high: odds_ratio * 2.0,
                p_value,
                strata: 12,
                observations: 36,
                iterations: 4,
            }),
        }
    }

    fn skipped(label: &str) -> PredictorReport {
        PredictorReport {
            predictor: PredictorSpec::new(label.to_lowercase(), label),
            outcome: PredictorOutcome::SkippedNoVariance,
        }
    }

    #[test]
    fn keeps_fitted_rows_sorted_by_p() {
        let reports = vec![
            fitted("Alpha", 1.5, 0.2),
            skipped("Beta"),
            fitted("Gamma", 3.0, 0.01),
            PredictorReport {
                predictor: PredictorSpec::new("delta", "Delta"),
                outcome: PredictorOutcome::FailedToConverge {
                    reason: "diverged".to_string(),
                },
            },
        ];
        let table = ResultTable::assemble(&reports, "Strata");

        let labels: Vec<&str> = table.rows.iter().map(|r| r.predictor.as_str()).collect();
        assert_eq!(labels, ["Gamma", "Alpha"]);
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.headers(),
            ["Predictor", "OR", "CI_low", "CI_high", "p", "Strata"]
        );
    }

    #[test]
    fn ties_keep_registry_order_after_rounding() {
        let reports = vec![
            fitted("First", 2.0, 0.031_24),
            fitted("Second", 2.0, 0.031_16),
            fitted("Third", 2.0, 0.001),
        ];
        let table = ResultTable::assemble(&reports, "Triplets");
        let labels: Vec<&str> = table.rows.iter().map(|r| r.predictor.as_str()).collect();
        // Both round to 0.0312.
        assert_eq!(labels, ["Third", "First", "Second"]);
        assert_eq!(table.rows[1].p_value, 0.0312);
    }

    #[test]
    fn rounds_ratios_and_p_values() {
        let table = ResultTable::assemble(&[fitted("Alpha", 2.732_050_8, 0.046_72)], "Strata");
        let row = &table.rows[0];
        assert_eq!(row.odds_ratio, 2.73);
        assert_eq!(row.ci_low, 1.37);
        assert_eq!(row.ci_high, 5.46);
        assert_eq!(row.p_value, 0.0467);
        assert_eq!(row.strata, 12);
    }

    #[test]
    fn nothing_fitted_gives_an_empty_table() {
        let table = ResultTable::assemble(&[skipped("Beta")], "Strata");
        assert!(table.is_empty());
    }
}
