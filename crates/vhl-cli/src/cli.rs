//! CLI argument definitions for the VHL conditional-logit analysis.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use vhl_model::Variant;

#[derive(Parser)]
#[command(
    name = "vhl-clogit",
    version,
    about = "Univariate conditional logistic regression for VHL matched case-control sets",
    long_about = "Fit one conditional-logit model per predictor within matched \
                  case-control sets of a VHL registry extract.\n\n\
                  Writes a CSV of odds ratios, 95% Wald confidence intervals and \
                  p-values, sorted by p, and prints the same table."
)]
pub struct Cli {
    /// Analysis preset (predictor registry, default paths, count column).
    #[arg(long, value_enum, default_value = "strata")]
    pub variant: VariantArg,

    /// TOML file overriding fields of the preset.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Input CSV (overrides preset and config file).
    #[arg(long = "in", value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Output CSV (overrides preset and config file).
    #[arg(long = "out", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Fit and print results without writing the output CSV.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// CLI analysis presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    /// All matched strata (`data/strata_vhl.csv`).
    Strata,
    /// 1:2 triplets (`data/strata_vhl_10.csv`).
    Triplets,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Strata => Variant::Strata,
            VariantArg::Triplets => Variant::Triplets,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
