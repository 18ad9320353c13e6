//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod files;
pub mod run;

pub use files::{handle_files_command, FilesArgs};
pub use run::{handle_run_command, RunArgs};
