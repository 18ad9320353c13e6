//! CSV export of the unified transaction table

use std::path::Path;

use super::{ensure_parent, row_text, WriteOptions};
use crate::error::CollateResult;
use crate::models::Transaction;

/// Write all transactions to a CSV file, replacing any existing file
pub fn write_transactions_csv(
    path: &Path,
    transactions: &[Transaction],
    options: &WriteOptions,
) -> CollateResult<()> {
    ensure_parent(path)?;

    let mut writer = ::csv::Writer::from_path(path)?;
    writer.write_record(options.headers())?;
    for txn in transactions {
        writer.write_record(row_text(txn, options))?;
    }
    writer.flush()?;

    tracing::info!(file = %path.display(), rows = transactions.len(), "wrote csv");
    Ok(())
}
