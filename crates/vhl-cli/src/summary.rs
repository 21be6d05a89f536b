use vhl_core::{AnalysisResult, StratumSummary};
use vhl_report::render_text;

use crate::types::RunOutcome;

/// Prints the result table to stdout. Everything else goes to stderr.
pub fn print_summary(outcome: &RunOutcome) {
    println!("{}", render_text(&outcome.table));
    for line in diagnostic_lines(outcome) {
        eprintln!("{line}");
    }
}

/// Strata footer, output location and `skipped:` lines, in print order.
pub fn diagnostic_lines(outcome: &RunOutcome) -> Vec<String> {
    let mut lines = vec![strata_footer(&outcome.analysis.strata)];
    lines.push(match &outcome.written {
        Some(path) => format!("Output: {}", path.display()),
        None => "Output: not written (dry run)".to_string(),
    });
    lines.extend(skipped_lines(&outcome.analysis));
    lines
}

/// One-line account of the matched-set filter.
pub fn strata_footer(summary: &StratumSummary) -> String {
    let mut footer = format!(
        "Matched sets: {} kept of {} ({} wrong size, {} wrong case count)",
        summary.kept, summary.total, summary.wrong_size, summary.wrong_cases
    );
    if summary.unassigned_rows > 0 {
        footer.push_str(&format!(
            "; {} row(s) without match_id",
            summary.unassigned_rows
        ));
    }
    footer
}

/// `skipped: <label> (<reason>)` for every predictor without a table row,
/// in registry order.
pub fn skipped_lines(analysis: &AnalysisResult) -> Vec<String> {
    analysis
        .not_fitted()
        .map(|report| format!("skipped: {} ({})", report.predictor.label, report.outcome))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vhl_model::{PredictorOutcome, PredictorReport, PredictorSpec};

    #[test]
    fn footer_mentions_unassigned_rows_only_when_present() {
        let summary = StratumSummary {
            total: 5,
            kept: 3,
            wrong_size: 1,
            wrong_cases: 1,
            unassigned_rows: 0,
        };
        insta::assert_snapshot!(
            strata_footer(&summary),
            @"Matched sets: 3 kept of 5 (1 wrong size, 1 wrong case count)"
        );

        let summary = StratumSummary {
            unassigned_rows: 2,
            ..summary
        };
        insta::assert_snapshot!(
            strata_footer(&summary),
            @"Matched sets: 3 kept of 5 (1 wrong size, 1 wrong case count); 2 row(s) without match_id"
        );
    }

    #[test]
    fn skipped_lines_give_label_and_reason() {
        let analysis = AnalysisResult {
            strata: StratumSummary::default(),
            reports: vec![
                PredictorReport {
                    predictor: PredictorSpec::new("Family", "Family history"),
                    outcome: PredictorOutcome::SkippedNoVariance,
                },
                PredictorReport {
                    predictor: PredictorSpec::new("Pheo", "Pheochromocytoma"),
                    outcome: PredictorOutcome::MissingColumn,
                },
            ],
        };
        assert_eq!(
            skipped_lines(&analysis),
            [
                "skipped: Family history (no within-stratum variation)",
                "skipped: Pheochromocytoma (column not found in input)",
            ]
        );
    }
}
