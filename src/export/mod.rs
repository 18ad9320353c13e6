//! Export module for statement-collate
//!
//! Writes the unified transaction table:
//! - XLSX: a workbook with a Transactions sheet and an optional Budget sheet
//! - CSV: the transactions only, same columns

pub mod csv;
pub mod xlsx;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CollateError, CollateResult};
use crate::models::Transaction;

pub use self::csv::write_transactions_csv;
pub use self::xlsx::{write_workbook, BUDGET_SHEET, TRANSACTIONS_SHEET};

/// Columns written for every transaction
pub const TRANSACTION_HEADERS: [&str; 10] = [
    "Date",
    "Transaction",
    "Description",
    "Amount",
    "Balance",
    "Category",
    "Year",
    "Month",
    "Account",
    "Account Type",
];

/// Columns added when transfer detection ran
pub const TRANSFER_HEADERS: [&str; 2] = ["Transfer", "Transfer Pair"];

/// Output file format
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Xlsx,
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }
}

/// Options controlling what gets written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Write the transactions as a styled table
    pub formatted_table: bool,
    /// Add the transfer columns
    pub include_transfers: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            formatted_table: true,
            include_transfers: false,
        }
    }
}

impl WriteOptions {
    pub fn headers(&self) -> Vec<&'static str> {
        let mut headers = TRANSACTION_HEADERS.to_vec();
        if self.include_transfers {
            headers.extend(TRANSFER_HEADERS);
        }
        headers
    }
}

/// Text form of a row, in header order
pub(crate) fn row_text(txn: &Transaction, options: &WriteOptions) -> Vec<String> {
    let source = txn.source.as_ref();
    let mut cells = vec![
        txn.date.to_string(),
        txn.kind.clone(),
        txn.description.clone(),
        txn.amount.to_plain_string(),
        txn.balance.map(|b| b.to_plain_string()).unwrap_or_default(),
        txn.category.clone().unwrap_or_default(),
        source.map(|s| s.year.to_string()).unwrap_or_default(),
        source.map(|s| s.month.to_string()).unwrap_or_default(),
        source.map(|s| s.account.clone()).unwrap_or_default(),
        source.map(|s| s.account_type.clone()).unwrap_or_default(),
    ];
    if options.include_transfers {
        cells.push(yes_no(txn.is_transfer).to_string());
        cells.push(txn.transfer_pair.map(|p| p.to_string()).unwrap_or_default());
    }
    cells
}

pub(crate) fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// Create the parent directory of an output file if it is missing
pub(crate) fn ensure_parent(path: &Path) -> CollateResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CollateError::Io(format!(
                    "Failed to create output directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}
