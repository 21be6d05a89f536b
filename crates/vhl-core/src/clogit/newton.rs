//! Newton-Raphson maximization with step halving.

use thiserror::Error;

use vhl_model::SolverOptions;

use super::likelihood::{WorkingModel, WorkingState};

#[derive(Debug, Clone, PartialEq)]
pub struct NewtonResult {
    pub coefficient: f64,
    /// Likelihood state at the returned coefficient.
    pub state: WorkingState,
    pub iterations: usize,
}

/// Why the likelihood could not be maximized.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    #[error("likelihood is not finite at beta = {coefficient}")]
    NonFinite { coefficient: f64 },
    #[error("singular information at beta = {coefficient}")]
    SingularInformation { coefficient: f64 },
    #[error(
        "estimate diverged (|beta| = {coefficient:.1} exceeds {limit}); the predictor may perfectly separate cases from controls"
    )]
    Diverged { coefficient: f64, limit: f64 },
    #[error("no likelihood increase after {halvings} step halvings at iteration {iteration}")]
    StepHalvingExhausted { iteration: usize, halvings: usize },
    #[error("no convergence after {iterations} iterations (last step {last_step:.3e})")]
    MaxIterations { iterations: usize, last_step: f64 },
}

fn usable(state: &WorkingState) -> bool {
    state.log_likelihood.is_finite() && state.score.is_finite() && state.information.is_finite()
}

/// Maximizes `model` starting from `β = 0`.
pub fn maximize<M: WorkingModel>(
    model: &M,
    options: &SolverOptions,
) -> Result<NewtonResult, SolverError> {
    let mut beta = 0.0_f64;
    let mut state = model.evaluate(beta);
    if !usable(&state) {
        return Err(SolverError::NonFinite { coefficient: beta });
    }

    let mut last_step = f64::NAN;
    for iteration in 1..=options.max_iterations {
        if state.information <= 0.0 {
            return Err(SolverError::SingularInformation { coefficient: beta });
        }

        let mut step = state.score / state.information;
        let mut candidate = beta + step;
        let mut next = model.evaluate(candidate);
        let floor = state.log_likelihood - 1e-12 * (1.0 + state.log_likelihood.abs());
        let mut halvings = 0;
        while !usable(&next) || next.log_likelihood < floor {
            if halvings == options.max_step_halvings {
                return Err(SolverError::StepHalvingExhausted {
                    iteration,
                    halvings,
                });
            }
            halvings += 1;
            step /= 2.0;
            candidate = beta + step;
            next = model.evaluate(candidate);
        }

        beta = candidate;
        state = next;
        last_step = step;

        if beta.abs() > options.max_abs_coefficient {
            return Err(SolverError::Diverged {
                coefficient: beta.abs(),
                limit: options.max_abs_coefficient,
            });
        }

        if step.abs() <= options.tolerance * (1.0 + beta.abs()) {
            if state.information <= 0.0 {
                return Err(SolverError::SingularInformation { coefficient: beta });
            }
            return Ok(NewtonResult {
                coefficient: beta,
                state,
                iterations: iteration,
            });
        }
    }

    Err(SolverError::MaxIterations {
        iterations: options.max_iterations,
        last_step,
    })
}
