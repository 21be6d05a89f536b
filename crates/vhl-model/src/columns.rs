//! Well-known column names.

/// Matched-set identifier. Treated as an opaque string key.
pub const STRATUM_ID: &str = "match_id";

/// Binary outcome flag (1 = retinal detachment, 0 = control).
pub const OUTCOME: &str = "case";

/// Subject identifier. Carried through untouched.
pub const SUBJECT_ID: &str = "subject_id";

/// Raw count of ocular treatments.
pub const COMBINED_TREATMENTS: &str = "Combined_treatments";

/// Raw 0/1 indicator for retinal capillary hemangioblastoma burden at baseline.
pub const RCH_AT_BASELINE: &str = "RCH_at_baseline";

/// Derived ordinal treatment category (0 / 1 / 2).
pub const TREAT_CAT: &str = "treat_cat";

/// Derived high-burden indicator, copied from [`RCH_AT_BASELINE`].
pub const HIGH_RCH: &str = "HighRCH";

/// Columns that are never coerced to numeric.
pub const IDENTIFIER_COLUMNS: [&str; 3] = [STRATUM_ID, OUTCOME, SUBJECT_ID];

/// Columns the loader needs to build the derived covariates.
pub const DERIVATION_SOURCES: [&str; 2] = [COMBINED_TREATMENTS, RCH_AT_BASELINE];

/// Returns true when `name` is an identifier column, ignoring ASCII case.
pub fn is_identifier_column(name: &str) -> bool {
    IDENTIFIER_COLUMNS
        .iter()
        .any(|id| id.eq_ignore_ascii_case(name.trim()))
}
