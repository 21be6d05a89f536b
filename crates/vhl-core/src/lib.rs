//! Matched-set filtering and univariate conditional logistic regression.
//!
//! The pipeline operates on a loaded registry extract:
//!
//! 1. [`strata::filter_strata`] keeps matched sets with the configured
//!    composition.
//! 2. [`working::WorkingSet`] projects one predictor with listwise deletion.
//! 3. [`fit::fit_predictor`] maximizes the conditional likelihood
//!    ([`clogit`]) and derives the odds ratio, Wald interval and p-value.
//! 4. [`analysis::run_analysis`] repeats this for every registry entry.

mod error;
mod frame;

pub mod analysis;
pub mod clogit;
pub mod fit;
pub mod normal;
pub mod strata;
pub mod working;

pub use analysis::{AnalysisResult, run_analysis};
pub use error::{CoreError, Result};
pub use fit::{Z_95, fit_predictor, fit_working_set};
pub use strata::{StratumSummary, filter_strata, outcome_flag};
pub use working::{MatchedSet, WorkingSet};
