//! Domain types for the VHL matched case-control analysis.
//!
//! This crate holds the vocabulary shared by every stage of the pipeline:
//!
//! - [`columns`]: well-known column names in the registry extract
//! - [`predictor`]: predictor specifications and the built-in registries
//! - [`config`]: analysis configuration, variants, and TOML overrides
//! - [`outcome`]: per-predictor fit results and tagged outcomes
//! - [`error`]: configuration errors

pub mod columns;
pub mod config;
pub mod error;
pub mod outcome;
pub mod predictor;

pub use config::{AnalysisConfig, ConfigOverrides, SolverOptions, StratumInvariant, Variant};
pub use error::{ModelError, Result};
pub use outcome::{FitResult, PredictorOutcome, PredictorReport};
pub use predictor::{PredictorSpec, strata_registry, triplet_registry};
