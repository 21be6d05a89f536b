//! Predictor specifications and the built-in registries.

use serde::{Deserialize, Serialize};

use crate::columns::{HIGH_RCH, TREAT_CAT};

/// A predictor column paired with the label printed in the results table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PredictorSpec {
    /// Column name in the loaded table.
    pub key: String,
    /// Human-readable label.
    pub label: String,
}

impl PredictorSpec {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

fn registry(entries: &[(&str, &str)]) -> Vec<PredictorSpec> {
    entries
        .iter()
        .map(|(key, label)| PredictorSpec::new(*key, *label))
        .collect()
}

/// Registry for the full strata extract (`strata_vhl.csv`).
///
/// Order is significant: it is the tie-break order of the results table.
pub fn strata_registry() -> Vec<PredictorSpec> {
    registry(&[
        (TREAT_CAT, "Any ocular treatment (ordinal 0/1/2)"),
        ("RCC", "Renal-cell carcinoma present"),
        ("Pancreas_Cyst", "Pancreatic cysts present"),
        (HIGH_RCH, "High RCH burden (≥ 3 lesions)"),
        ("Spinal_HB", "Spinal hemangioblastoma present"),
        ("CNS_HB", "CNS hemangioblastoma present"),
        ("Family", "Positive family history"),
        ("Pheo", "Pheochromocytoma present"),
        ("Renal_Cysts", "Renal cysts present"),
        ("NETs_pancreas", "Pancreatic NETs present"),
        ("Pancreas_CA", "Pancreatic carcinoma present"),
    ])
}

/// Registry for the 1:2 triplet extract (`strata_vhl_10.csv`), which uses
/// the registry's coded column names.
pub fn triplet_registry() -> Vec<PredictorSpec> {
    registry(&[
        (TREAT_CAT, "Any ocular treatment (ordinal 0/1/2)"),
        ("RCC_0_yes", "Renal-cell carcinoma present"),
        ("Pancreas_Cyst_0_yes", "Pancreatic cysts present"),
        (HIGH_RCH, "High RCH burden (≥ 3 lesions)"),
        ("Spinal_HB_yes_no", "Spinal hemangioblastoma present"),
        ("CNS_HB_0_yes", "CNS hemangioblastoma present"),
    ])
}
