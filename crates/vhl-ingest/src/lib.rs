//! Registry extract ingestion.
//!
//! This crate turns a matched case-control CSV extract into the Polars
//! table every later stage reads from.
//!
//! # Steps
//!
//! - **Read**: every column as text, single header row
//! - **Coerce**: non-identifier columns to `Float64`; `Na`/`NA`/`na`, empty
//!   and unparseable cells become null
//! - **Derive**: `treat_cat` from `Combined_treatments`, `HighRCH` from
//!   `RCH_at_baseline`
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use vhl_ingest::load_dataset;
//!
//! let df = load_dataset(Path::new("data/strata_vhl.csv"))?;
//! ```

mod coerce;
mod derive;
mod error;
mod loader;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Loading ===
pub use loader::{load_dataset, require_columns};
pub use reader::read_csv_text;

// === Cleaning ===
pub use coerce::{MISSING_SENTINELS, coerce_numeric_columns, parse_numeric};
pub use derive::{derive_covariates, treatment_category};
