//! Configuration module for statement-collate
//!
//! This module provides configuration management including:
//! - Config directory resolution
//! - Settings with hardcoded defaults and optional file overrides

pub mod paths;
pub mod settings;

pub use paths::CollatePaths;
pub use settings::Settings;
