//! Display formatting for terminal output
//!
//! Provides utilities for formatting run results for terminal display.

pub mod report;
pub mod summary;

pub use summary::{
    format_budget_comparison, format_classification, format_missing, format_run_summary,
    format_transfer_report,
};
