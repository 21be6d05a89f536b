//! Per-predictor fit results.

use std::fmt;

use crate::predictor::PredictorSpec;

/// Estimates from one univariate conditional-logit fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    /// Log odds ratio per one-unit increase of the predictor.
    pub coefficient: f64,
    pub std_error: f64,
    pub odds_ratio: f64,
    /// Lower bound of the 95% Wald interval on the odds-ratio scale.
    pub ci_low: f64,
    /// Upper bound of the 95% Wald interval on the odds-ratio scale.
    pub ci_high: f64,
    /// Two-sided Wald p-value.
    pub p_value: f64,
    /// Distinct matched sets left after listwise deletion.
    pub strata: usize,
    /// Rows left after listwise deletion.
    pub observations: usize,
    /// Newton iterations used.
    pub iterations: usize,
}

/// What happened to one predictor.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictorOutcome {
    Fitted(FitResult),
    /// No matched set has more than one distinct predictor value.
    SkippedNoVariance,
    /// The likelihood could not be maximized.
    FailedToConverge { reason: String },
    /// The predictor column is not in the dataset.
    MissingColumn,
}

impl PredictorOutcome {
    pub fn fit(&self) -> Option<&FitResult> {
        match self {
            PredictorOutcome::Fitted(fit) => Some(fit),
            _ => None,
        }
    }

    pub fn is_fitted(&self) -> bool {
        matches!(self, PredictorOutcome::Fitted(_))
    }

    /// Short machine-friendly tag, used in structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PredictorOutcome::Fitted(_) => "fitted",
            PredictorOutcome::SkippedNoVariance => "no_variance",
            PredictorOutcome::FailedToConverge { .. } => "failed_to_converge",
            PredictorOutcome::MissingColumn => "missing_column",
        }
    }
}

impl fmt::Display for PredictorOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictorOutcome::Fitted(fit) => write!(
                f,
                "OR {:.3} (95% CI {:.3}-{:.3}), p = {:.4}",
                fit.odds_ratio, fit.ci_low, fit.ci_high, fit.p_value
            ),
            PredictorOutcome::SkippedNoVariance => {
                f.write_str("no within-stratum variation")
            }
            PredictorOutcome::FailedToConverge { reason } => {
                write!(f, "fit failed: {reason}")
            }
            PredictorOutcome::MissingColumn => f.write_str("column not found in input"),
        }
    }
}

/// A registry entry together with its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictorReport {
    pub predictor: PredictorSpec,
    pub outcome: PredictorOutcome,
}
