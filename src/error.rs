//! Custom error types for statement-collate
//!
//! This module defines the error hierarchy for the library using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for statement-collate operations
#[derive(Error, Debug)]
pub enum CollateError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Validation errors for statement data
    #[error("Validation error: {0}")]
    Validation(String),

    /// A statement file could not be normalized
    #[error("Import error in {file}: {reason}")]
    Import { file: String, reason: String },

    /// Spreadsheet or CSV output errors
    #[error("Export error: {0}")]
    Export(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Nothing was collected from the input files
    #[error("No data found to combine")]
    NoData,
}

impl CollateError {
    /// Create an import error for a file
    pub fn import(file: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Import {
            file: file.into(),
            reason: reason.into(),
        }
    }

    /// Create a "not found" error for files
    pub fn file_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "File",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for directories
    pub fn directory_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Directory",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an import error
    pub fn is_import(&self) -> bool {
        matches!(self, Self::Import { .. })
    }
}

impl From<std::io::Error> for CollateError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CollateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for CollateError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for CollateError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for statement-collate operations
pub type CollateResult<T> = Result<T, CollateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CollateError::Config("bad year range".into());
        assert_eq!(err.to_string(), "Configuration error: bad year range");
    }

    #[test]
    fn test_import_error() {
        let err = CollateError::import("2024_01_td_cheq.csv", "no recognizable columns");
        assert_eq!(
            err.to_string(),
            "Import error in 2024_01_td_cheq.csv: no recognizable columns"
        );
        assert!(err.is_import());
    }

    #[test]
    fn test_not_found_error() {
        let err = CollateError::file_not_found("settings.json");
        assert_eq!(err.to_string(), "File not found: settings.json");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CollateError = io_err.into();
        assert!(matches!(err, CollateError::Io(_)));
    }

    #[test]
    fn test_no_data_display() {
        assert_eq!(CollateError::NoData.to_string(), "No data found to combine");
    }
}
