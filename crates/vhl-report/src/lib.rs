//! Result table assembly and output.
//!
//! Fitted predictors become one row each, rounded and ordered by p-value.
//! The same [`ResultTable`] is written as CSV and rendered for the terminal.

pub mod error;
pub mod render;
pub mod rounding;
pub mod table;
pub mod writer;

pub use error::{ReportError, Result};
pub use render::{render_table, render_text};
pub use rounding::round_half_even;
pub use table::{ResultRow, ResultTable};
pub use writer::{format_float, write_csv, write_csv_to};
