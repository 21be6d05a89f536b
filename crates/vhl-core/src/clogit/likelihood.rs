//! Conditional log-likelihood for one covariate.
//!
//! For a matched set `g` with `d` cases among `n` rows the contribution is
//!
//! ```text
//! ℓ_g(β) = β · Σ_{i ∈ cases} x_i − log Σ_{|S| = d} exp(β · Σ_{i ∈ S} x_i)
//! ```
//!
//! The denominator is the elementary symmetric polynomial of degree `d` in
//! the weights `w_i = exp(β x_i)`, built by the usual one-row-at-a-time
//! recursion together with its first two derivatives. With one case per set
//! it reduces to a softmax over the set.

use crate::working::MatchedSet;

/// Log-likelihood and its derivatives at one coefficient value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkingState {
    pub log_likelihood: f64,
    /// First derivative of the log-likelihood.
    pub score: f64,
    /// Observed information, the negated second derivative.
    pub information: f64,
}

/// Anything the Newton solver can maximize.
pub trait WorkingModel {
    fn evaluate(&self, beta: f64) -> WorkingState;
}

#[derive(Debug, Clone)]
struct PreparedSet {
    values: Vec<f64>,
    cases: usize,
    case_sum: f64,
}

/// Conditional likelihood over a collection of matched sets.
///
/// Sets with no cases or only cases carry no information about `β` and are
/// dropped on construction.
#[derive(Debug, Clone)]
pub struct ConditionalLikelihood {
    sets: Vec<PreparedSet>,
}

impl ConditionalLikelihood {
    pub fn new(sets: &[MatchedSet]) -> Self {
        let sets = sets
            .iter()
            .filter_map(|set| {
                let cases = set.cases();
                if cases == 0 || cases == set.len() {
                    return None;
                }
                let case_sum = set
                    .values
                    .iter()
                    .zip(&set.outcomes)
                    .filter(|(_, case)| **case)
                    .map(|(x, _)| *x)
                    .sum();
                Some(PreparedSet {
                    values: set.values.clone(),
                    cases,
                    case_sum,
                })
            })
            .collect();
        Self { sets }
    }

    /// Matched sets with both cases and controls.
    pub fn informative_sets(&self) -> usize {
        self.sets.len()
    }
}

fn evaluate_set(set: &PreparedSet, beta: f64) -> WorkingState {
    let d = set.cases;
    // Shift every exponent by the largest one so weights stay in (0, 1].
    let shift = set
        .values
        .iter()
        .map(|x| beta * x)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut b = vec![0.0; d + 1];
    let mut b1 = vec![0.0; d + 1];
    let mut b2 = vec![0.0; d + 1];
    b[0] = 1.0;

    for &x in &set.values {
        let w = (beta * x - shift).exp();
        for k in (1..=d).rev() {
            b2[k] += w * (x * x * b[k - 1] + 2.0 * x * b1[k - 1] + b2[k - 1]);
            b1[k] += w * (x * b[k - 1] + b1[k - 1]);
            b[k] += w * b[k - 1];
        }
    }

    let denom = b[d];
    let mean = b1[d] / denom;
    let second = b2[d] / denom;
    WorkingState {
        log_likelihood: beta * set.case_sum - (denom.ln() + d as f64 * shift),
        score: set.case_sum - mean,
        information: second - mean * mean,
    }
}

impl WorkingModel for ConditionalLikelihood {
    fn evaluate(&self, beta: f64) -> WorkingState {
        let mut total = WorkingState {
            log_likelihood: 0.0,
            score: 0.0,
            information: 0.0,
        };
        for set in &self.sets {
            let state = evaluate_set(set, beta);
            total.log_likelihood += state.log_likelihood;
            total.score += state.score;
            total.information += state.information;
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triplet(id: &str, values: [f64; 3], case_index: usize) -> MatchedSet {
        let outcomes = (0..3).map(|i| i == case_index).collect();
        MatchedSet::new(id, outcomes, values.to_vec())
    }

    #[test]
    fn single_case_matches_softmax() {
        let set = triplet("a", [0.0, 1.0, 2.0], 1);
        let model = ConditionalLikelihood::new(std::slice::from_ref(&set));
        let beta = 0.7_f64;

        let weights: Vec<f64> = set.values.iter().map(|x| (beta * x).exp()).collect();
        let total: f64 = weights.iter().sum();
        let expected_ll = beta * 1.0 - total.ln();
        let mean: f64 = set
            .values
            .iter()
            .zip(&weights)
            .map(|(x, w)| x * w / total)
            .sum();
        let second: f64 = set
            .values
            .iter()
            .zip(&weights)
            .map(|(x, w)| x * x * w / total)
            .sum();

        let state = model.evaluate(beta);
        assert!((state.log_likelihood - expected_ll).abs() < 1e-12);
        assert!((state.score - (1.0 - mean)).abs() < 1e-12);
        assert!((state.information - (second - mean * mean)).abs() < 1e-12);
    }

    #[test]
    fn two_cases_enumerate_pairs() {
        let set = MatchedSet::new(
            "a",
            vec![true, true, false, false],
            vec![1.0, 0.0, 2.0, 0.5],
        );
        let model = ConditionalLikelihood::new(std::slice::from_ref(&set));
        let beta = -0.4_f64;

        let mut denom = 0.0;
        for i in 0..4 {
            for j in (i + 1)..4 {
                denom += (beta * (set.values[i] + set.values[j])).exp();
            }
        }
        let expected = beta * 1.0 - denom.ln();
        assert!((model.evaluate(beta).log_likelihood - expected).abs() < 1e-12);
    }

    #[test]
    fn derivatives_agree_with_finite_differences() {
        let sets = vec![
            triplet("a", [0.0, 1.0, 1.0], 1),
            triplet("b", [0.0, 0.0, 1.0], 0),
            triplet("c", [2.0, 0.0, 1.0], 2),
        ];
        let model = ConditionalLikelihood::new(&sets);
        let beta = 0.3;
        let h = 1e-5;
        let up = model.evaluate(beta + h);
        let down = model.evaluate(beta - h);
        let state = model.evaluate(beta);

        let score_fd = (up.log_likelihood - down.log_likelihood) / (2.0 * h);
        let info_fd = -(up.score - down.score) / (2.0 * h);
        assert!((state.score - score_fd).abs() < 1e-6);
        assert!((state.information - info_fd).abs() < 1e-6);
    }

    #[test]
    fn uninformative_sets_are_dropped() {
        let sets = vec![
            MatchedSet::new("none", vec![false, false], vec![1.0, 0.0]),
            MatchedSet::new("all", vec![true], vec![1.0]),
            triplet("ok", [0.0, 1.0, 0.0], 0),
        ];
        let model = ConditionalLikelihood::new(&sets);
        assert_eq!(model.informative_sets(), 1);
    }

    #[test]
    fn large_coefficients_stay_finite() {
        let set = triplet("a", [0.0, 40.0, 80.0], 2);
        let model = ConditionalLikelihood::new(std::slice::from_ref(&set));
        let state = model.evaluate(25.0);
        assert!(state.log_likelihood.is_finite());
        assert!(state.score.is_finite());
        assert!(state.information.is_finite());
    }
}
