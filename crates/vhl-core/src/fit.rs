//! Fitting one predictor.

use polars::prelude::DataFrame;

use vhl_model::{FitResult, PredictorOutcome, SolverOptions};

use crate::clogit::{ConditionalLikelihood, NewtonResult, maximize};
use crate::error::Result;
use crate::frame::has_column;
use crate::normal::two_sided_p_value;
use crate::working::WorkingSet;

/// Normal quantile for a two-sided 95% interval.
pub const Z_95: f64 = 1.96;

/// Fits `outcome ~ predictor` conditioning on matched set.
///
/// Returns an error only for table-level problems (a missing outcome or
/// stratum column). Everything that can go wrong with the predictor itself
/// is reported as a [`PredictorOutcome`].
pub fn fit_predictor(
    df: &DataFrame,
    predictor: &str,
    options: &SolverOptions,
) -> Result<PredictorOutcome> {
    if !has_column(df, predictor) {
        return Ok(PredictorOutcome::MissingColumn);
    }
    let working = WorkingSet::from_frame(df, predictor)?;
    Ok(fit_working_set(&working, options))
}

/// Fits an already-extracted working set.
pub fn fit_working_set(working: &WorkingSet, options: &SolverOptions) -> PredictorOutcome {
    if !working.has_within_stratum_variation() {
        return PredictorOutcome::SkippedNoVariance;
    }
    let model = ConditionalLikelihood::new(&working.sets);
    if model.informative_sets() == 0 {
        return PredictorOutcome::FailedToConverge {
            reason: "no matched set has both a case and a control".to_string(),
        };
    }
    match maximize(&model, options) {
        Ok(result) => PredictorOutcome::Fitted(summarize(&result, working)),
        Err(err) => PredictorOutcome::FailedToConverge {
            reason: err.to_string(),
        },
    }
}

fn summarize(result: &NewtonResult, working: &WorkingSet) -> FitResult {
    let beta = result.coefficient;
    let std_error = result.state.information.sqrt().recip();
    FitResult {
        coefficient: beta,
        std_error,
        odds_ratio: beta.exp(),
        ci_low: (beta - Z_95 * std_error).exp(),
        ci_high: (beta + Z_95 * std_error).exp(),
        p_value: two_sided_p_value(beta / std_error),
        strata: working.strata(),
        observations: working.observations(),
        iterations: result.iterations,
    }
}
