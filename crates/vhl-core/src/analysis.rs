//! Batch driver: filter once, then fit every registry entry in order.

use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::{debug, info, info_span, warn};

use vhl_model::{AnalysisConfig, PredictorOutcome, PredictorReport, PredictorSpec, SolverOptions};

use crate::error::Result;
use crate::fit::fit_predictor;
use crate::strata::{StratumSummary, filter_strata};

/// Everything the report stage needs.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub strata: StratumSummary,
    /// One report per registry entry, in registry order.
    pub reports: Vec<PredictorReport>,
}

impl AnalysisResult {
    pub fn fitted(&self) -> impl Iterator<Item = &PredictorReport> {
        self.reports.iter().filter(|r| r.outcome.is_fitted())
    }

    pub fn not_fitted(&self) -> impl Iterator<Item = &PredictorReport> {
        self.reports.iter().filter(|r| !r.outcome.is_fitted())
    }
}

/// Filters `df` to valid matched sets and fits each configured predictor.
///
/// A predictor that cannot be fitted never aborts the batch; its report
/// carries the reason instead.
pub fn run_analysis(df: &DataFrame, config: &AnalysisConfig) -> Result<AnalysisResult> {
    let (filtered, strata) = filter_strata(df, config.invariant)?;

    let mut reports = Vec::with_capacity(config.predictors.len());
    for predictor in &config.predictors {
        let outcome = fit_one(&filtered, predictor, &config.solver)?;
        reports.push(PredictorReport {
            predictor: predictor.clone(),
            outcome,
        });
    }

    info!(
        predictors = reports.len(),
        fitted = reports.iter().filter(|r| r.outcome.is_fitted()).count(),
        "analysis complete"
    );
    Ok(AnalysisResult { strata, reports })
}

fn fit_one(
    df: &DataFrame,
    predictor: &PredictorSpec,
    options: &SolverOptions,
) -> Result<PredictorOutcome> {
    let span = info_span!("fit", predictor = %predictor.key);
    let _guard = span.enter();
    let start = Instant::now();

    let outcome = fit_predictor(df, &predictor.key, options)?;
    match &outcome {
        PredictorOutcome::Fitted(fit) => info!(
            label = %predictor.label,
            odds_ratio = fit.odds_ratio,
            p_value = fit.p_value,
            strata = fit.strata,
            iterations = fit.iterations,
            duration_ms = start.elapsed().as_millis(),
            "predictor fitted"
        ),
        PredictorOutcome::SkippedNoVariance => info!(
            label = %predictor.label,
            "predictor skipped: no within-stratum variation"
        ),
        PredictorOutcome::FailedToConverge { reason } => warn!(
            label = %predictor.label,
            reason = %reason,
            "predictor could not be fitted"
        ),
        PredictorOutcome::MissingColumn => warn!(
            label = %predictor.label,
            "predictor column not found in input"
        ),
    }
    debug!(outcome = outcome.kind(), "fit finished");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};
    use vhl_model::columns::{OUTCOME, STRATUM_ID};

    fn config(keys: &[&str]) -> AnalysisConfig {
        AnalysisConfig::default().with_predictors(
            keys.iter()
                .map(|k| PredictorSpec::new(*k, format!("label {k}")))
                .collect(),
        )
    }

    #[test]
    fn reports_follow_registry_order() {
        let df = DataFrame::new(vec![
            Series::new(STRATUM_ID.into(), vec!["a", "a", "a", "b", "b", "b"]).into_column(),
            Series::new(OUTCOME.into(), vec![1.0, 0.0, 0.0, 1.0, 0.0, 0.0]).into_column(),
            Series::new("flat".into(), vec![1.0; 6]).into_column(),
        ])
        .unwrap();

        let result = run_analysis(&df, &config(&["absent", "flat"])).unwrap();
        let keys: Vec<&str> = result
            .reports
            .iter()
            .map(|r| r.predictor.key.as_str())
            .collect();
        assert_eq!(keys, ["absent", "flat"]);
        assert_eq!(result.reports[0].outcome, PredictorOutcome::MissingColumn);
        assert_eq!(result.reports[1].outcome, PredictorOutcome::SkippedNoVariance);
        assert_eq!(result.fitted().count(), 0);
        assert_eq!(result.not_fitted().count(), 2);
        assert_eq!(result.strata.kept, 2);
    }
}
