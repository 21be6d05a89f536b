//! CLI library components for the VHL conditional-logit analysis.

pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
