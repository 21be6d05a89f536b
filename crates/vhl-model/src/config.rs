//! Analysis configuration.
//!
//! The two registry extracts (full strata and 1:2 triplets) run through the
//! same pipeline and differ only in configuration. A [`Variant`] selects a
//! preset [`AnalysisConfig`]; an optional TOML file ([`ConfigOverrides`])
//! replaces individual fields of the preset.
//!
//! ```toml
//! input = "data/strata_vhl.csv"
//! output = "results/clogit_results.csv"
//! count_column = "Strata"
//!
//! [invariant]
//! size = 3
//! cases = 1
//!
//! [solver]
//! max_iterations = 50
//!
//! [[predictors]]
//! key = "RCC"
//! label = "Renal-cell carcinoma present"
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::predictor::{PredictorSpec, strata_registry, triplet_registry};

/// Structural requirement every matched set must meet before fitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StratumInvariant {
    /// Exact number of rows in the matched set.
    pub size: usize,
    /// Exact number of rows with outcome = 1.
    pub cases: usize,
}

impl StratumInvariant {
    /// One case and two controls.
    pub const TRIPLET: Self = Self { size: 3, cases: 1 };

    /// Returns true if a matched set with these counts is retained.
    pub fn accepts(&self, rows: usize, cases: usize) -> bool {
        rows == self.size && cases == self.cases
    }

    fn validate(&self) -> Result<()> {
        if self.cases == 0 || self.cases >= self.size {
            return Err(ModelError::InvalidInvariant {
                size: self.size,
                cases: self.cases,
            });
        }
        Ok(())
    }
}

impl Default for StratumInvariant {
    fn default() -> Self {
        Self::TRIPLET
    }
}

impl fmt::Display for StratumInvariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rows / {} case(s)", self.size, self.cases)
    }
}

/// Newton-Raphson settings for the conditional likelihood.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverOptions {
    /// Convergence threshold on the Newton step, relative to `1 + |beta|`.
    pub tolerance: f64,
    /// Newton iterations before giving up.
    pub max_iterations: usize,
    /// Step halvings allowed per iteration.
    pub max_step_halvings: usize,
    /// Coefficients beyond this magnitude are treated as divergence to an
    /// infinite estimate (monotone likelihood).
    pub max_abs_coefficient: f64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-8,
            max_iterations: 100,
            max_step_halvings: 30,
            max_abs_coefficient: 30.0,
        }
    }
}

impl SolverOptions {
    fn validate(&self) -> Result<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(ModelError::InvalidSolver {
                field: "tolerance",
                reason: format!("must be a positive number, got {}", self.tolerance),
            });
        }
        if self.max_iterations == 0 {
            return Err(ModelError::InvalidSolver {
                field: "max_iterations",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.max_abs_coefficient.is_finite() && self.max_abs_coefficient > 0.0) {
            return Err(ModelError::InvalidSolver {
                field: "max_abs_coefficient",
                reason: format!(
                    "must be a positive number, got {}",
                    self.max_abs_coefficient
                ),
            });
        }
        Ok(())
    }
}

/// Built-in analysis presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Variant {
    /// All matched strata from `strata_vhl.csv`.
    #[default]
    Strata,
    /// The 1:2 triplet extract `strata_vhl_10.csv`.
    Triplets,
}

impl Variant {
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Strata => "strata",
            Variant::Triplets => "triplets",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything one analysis run needs besides the data itself.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Ordered predictor registry. Output ties are broken by this order.
    pub predictors: Vec<PredictorSpec>,
    pub invariant: StratumInvariant,
    /// Header of the last output column (number of contributing strata).
    pub count_column: String,
    pub solver: SolverOptions,
}

impl AnalysisConfig {
    /// Preset reproducing one of the two registry analyses.
    pub fn preset(variant: Variant) -> Self {
        match variant {
            Variant::Strata => Self {
                input_path: PathBuf::from("data/strata_vhl.csv"),
                output_path: PathBuf::from("results/clogit_results.csv"),
                predictors: strata_registry(),
                invariant: StratumInvariant::TRIPLET,
                count_column: "Strata".to_string(),
                solver: SolverOptions::default(),
            },
            Variant::Triplets => Self {
                input_path: PathBuf::from("data/strata_vhl_10.csv"),
                output_path: PathBuf::from("results/triplet_results.csv"),
                predictors: triplet_registry(),
                invariant: StratumInvariant::TRIPLET,
                count_column: "Triplets".to_string(),
                solver: SolverOptions::default(),
            },
        }
    }

    /// Overrides the input path.
    pub fn with_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = path.into();
        self
    }

    /// Overrides the output path.
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Replaces the predictor registry.
    pub fn with_predictors(mut self, predictors: Vec<PredictorSpec>) -> Self {
        self.predictors = predictors;
        self
    }

    /// Replaces every field that `overrides` sets.
    pub fn apply(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(input) = overrides.input {
            self.input_path = input;
        }
        if let Some(output) = overrides.output {
            self.output_path = output;
        }
        if let Some(count_column) = overrides.count_column {
            self.count_column = count_column;
        }
        if let Some(invariant) = overrides.invariant {
            self.invariant = invariant;
        }
        if let Some(solver) = overrides.solver {
            self.solver = solver;
        }
        if let Some(predictors) = overrides.predictors {
            self.predictors = predictors;
        }
        self
    }

    /// Checks the registry, invariant, and solver settings.
    pub fn validate(&self) -> Result<()> {
        if self.predictors.is_empty() {
            return Err(ModelError::EmptyRegistry);
        }
        let mut seen = BTreeSet::new();
        for predictor in &self.predictors {
            if !seen.insert(predictor.key.as_str()) {
                return Err(ModelError::DuplicatePredictor {
                    key: predictor.key.clone(),
                });
            }
        }
        if self.count_column.trim().is_empty() {
            return Err(ModelError::EmptyCountColumn);
        }
        self.invariant.validate()?;
        self.solver.validate()
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::preset(Variant::default())
    }
}

/// Partial configuration read from a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub count_column: Option<String>,
    pub invariant: Option<StratumInvariant>,
    pub solver: Option<SolverOptions>,
    pub predictors: Option<Vec<PredictorSpec>>,
}

impl ConfigOverrides {
    /// Parses overrides from TOML text. `path` is only used for error messages.
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| ModelError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads and parses a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ModelError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::TREAT_CAT;

    #[test]
    fn presets_differ_only_in_configuration() {
        let strata = AnalysisConfig::preset(Variant::Strata);
        let triplets = AnalysisConfig::preset(Variant::Triplets);
        assert_eq!(strata.invariant, triplets.invariant);
        assert_eq!(strata.count_column, "Strata");
        assert_eq!(triplets.count_column, "Triplets");
        assert_eq!(strata.input_path, PathBuf::from("data/strata_vhl.csv"));
        assert_eq!(
            triplets.output_path,
            PathBuf::from("results/triplet_results.csv")
        );
        strata.validate().unwrap();
        triplets.validate().unwrap();
    }

    #[test]
    fn invariant_accepts_exact_composition_only() {
        let inv = StratumInvariant::TRIPLET;
        assert!(inv.accepts(3, 1));
        assert!(!inv.accepts(2, 1));
        assert!(!inv.accepts(4, 1));
        assert!(!inv.accepts(3, 0));
        assert!(!inv.accepts(3, 2));
    }

    #[test]
    fn validate_rejects_bad_configs() {
        let config = AnalysisConfig::default().with_predictors(Vec::new());
        assert!(matches!(config.validate(), Err(ModelError::EmptyRegistry)));

        let config = AnalysisConfig::default().with_predictors(vec![
            PredictorSpec::new("RCC", "a"),
            PredictorSpec::new("RCC", "b"),
        ]);
        assert!(matches!(
            config.validate(),
            Err(ModelError::DuplicatePredictor { .. })
        ));

        let mut config = AnalysisConfig::default();
        config.invariant = StratumInvariant { size: 3, cases: 0 };
        assert!(matches!(
            config.validate(),
            Err(ModelError::InvalidInvariant { .. })
        ));

        let mut config = AnalysisConfig::default();
        config.count_column = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ModelError::EmptyCountColumn)
        ));

        let mut config = AnalysisConfig::default();
        config.solver.max_iterations = 0;
        assert!(matches!(
            config.validate(),
            Err(ModelError::InvalidSolver {
                field: "max_iterations",
                ..
            })
        ));
    }

    #[test]
    fn overrides_replace_only_given_fields() {
        let text = r#"
output = "out/custom.csv"

[invariant]
size = 4
cases = 1

[solver]
max_iterations = 25

[[predictors]]
key = "treat_cat"
label = "Treatment"
"#;
        let overrides = ConfigOverrides::from_toml_str(text, Path::new("test.toml")).unwrap();
        let config = AnalysisConfig::preset(Variant::Triplets).apply(overrides);

        assert_eq!(config.input_path, PathBuf::from("data/strata_vhl_10.csv"));
        assert_eq!(config.output_path, PathBuf::from("out/custom.csv"));
        assert_eq!(config.invariant, StratumInvariant { size: 4, cases: 1 });
        assert_eq!(config.solver.max_iterations, 25);
        assert_eq!(
            config.solver.tolerance,
            SolverOptions::default().tolerance
        );
        assert_eq!(config.count_column, "Triplets");
        assert_eq!(config.predictors, vec![PredictorSpec::new(TREAT_CAT, "Treatment")]);
        config.validate().unwrap();
    }

    #[test]
    fn overrides_reject_unknown_keys() {
        let err = ConfigOverrides::from_toml_str("inputs = \"x.csv\"", Path::new("bad.toml"))
            .unwrap_err();
        assert!(matches!(err, ModelError::ConfigParse { .. }));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis.toml");
        std::fs::write(&path, "count_column = \"Sets\"\n").unwrap();
        let overrides = ConfigOverrides::load(&path).unwrap();
        assert_eq!(overrides.count_column.as_deref(), Some("Sets"));

        let missing = ConfigOverrides::load(&dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(ModelError::ConfigRead { .. })));
    }
}
