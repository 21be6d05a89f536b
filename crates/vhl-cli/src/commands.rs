use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use vhl_core::run_analysis;
use vhl_ingest::load_dataset;
use vhl_model::{AnalysisConfig, ConfigOverrides};
use vhl_report::{ResultTable, write_csv};

use crate::types::{AnalysisRequest, RunOutcome};

/// Resolves the effective configuration.
///
/// Precedence, lowest first: variant preset, config file, `--in`/`--out`.
pub fn resolve_config(request: &AnalysisRequest) -> Result<AnalysisConfig> {
    let mut config = AnalysisConfig::preset(request.variant);
    if let Some(path) = &request.config_file {
        let overrides = ConfigOverrides::load(path).context("load config file")?;
        config = config.apply(overrides);
    }
    if let Some(input) = &request.input {
        config = config.with_input(input);
    }
    if let Some(output) = &request.output {
        config = config.with_output(output);
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Load, filter, fit, and (unless dry-running) write the result table.
pub fn run_analysis_command(request: &AnalysisRequest) -> Result<RunOutcome> {
    let config = resolve_config(request)?;
    let span = info_span!(
        "analysis",
        variant = %request.variant,
        input = %config.input_path.display()
    );
    let _guard = span.enter();
    let start = Instant::now();

    let df = load_dataset(&config.input_path)
        .with_context(|| format!("load {}", config.input_path.display()))?;
    let analysis = run_analysis(&df, &config).context("fit predictors")?;
    let table = ResultTable::assemble(&analysis.reports, config.count_column.as_str());

    let written = if request.dry_run {
        info!(path = %config.output_path.display(), "dry run, output not written");
        None
    } else {
        write_csv(&table, &config.output_path)
            .with_context(|| format!("write {}", config.output_path.display()))?;
        Some(config.output_path.clone())
    };

    info!(
        rows = table.len(),
        duration_ms = start.elapsed().as_millis(),
        "run complete"
    );
    Ok(RunOutcome {
        variant: request.variant,
        config,
        analysis,
        table,
        written,
    })
}
