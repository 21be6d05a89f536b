//! Conditional logistic regression for a single covariate.
//!
//! Conditioning on the number of cases in each matched set removes the
//! set-specific intercepts, leaving one coefficient to estimate. This is the
//! same estimator as a Cox partial likelihood with one stratum per matched
//! set.

mod likelihood;
mod newton;

pub use likelihood::{ConditionalLikelihood, WorkingModel, WorkingState};
pub use newton::{NewtonResult, SolverError, maximize};
