use std::path::PathBuf;

use vhl_core::AnalysisResult;
use vhl_model::{AnalysisConfig, Variant};
use vhl_report::ResultTable;

/// What the user asked for, after argument parsing.
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    pub variant: Variant,
    pub config_file: Option<PathBuf>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct RunOutcome {
    pub variant: Variant,
    pub config: AnalysisConfig,
    pub analysis: AnalysisResult,
    pub table: ResultTable,
    /// Path of the written CSV; `None` on a dry run.
    pub written: Option<PathBuf>,
}
