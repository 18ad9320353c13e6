//! statement-collate - combine bank statement exports into one spreadsheet
//!
//! Every bank exports statements with its own CSV layout. This crate maps each
//! layout onto one canonical set of columns, concatenates the results, and
//! writes them to an XLSX workbook (or CSV). Transfer matching and a budget
//! comparison are optional stages.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, transactions, schemas, budgets)
//! - `services`: One service per pipeline stage, plus the pipeline itself
//! - `export`: XLSX and CSV writers
//! - `display`: Terminal summaries
//! - `cli`: Command handlers for the `collate` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use statement_collate::config::{CollatePaths, Settings};
//! use statement_collate::services::{CollateService, RunOptions};
//!
//! let paths = CollatePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let summary = CollateService::new(&settings).run(&RunOptions::from_settings(&settings))?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;

pub use error::{CollateError, CollateResult};
