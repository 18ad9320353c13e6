//! Per-account column schemas
//!
//! Each bank exports a different column layout. An [`AccountSchema`] names
//! the source columns that feed each canonical column (Date, Transaction,
//! Description, Amount, Balance). Names are matched case-insensitively.

use serde::{Deserialize, Serialize};

/// Canonical output column names
pub const CANONICAL_COLUMNS: [&str; 5] = ["Date", "Transaction", "Description", "Amount", "Balance"];

/// Where the signed amount comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountColumns {
    /// One signed amount column
    Single(String),
    /// Separate "funds in" / "funds out" columns; amount = in - out
    Split { funds_in: String, funds_out: String },
}

/// Column layout of one account's CSV export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSchema {
    /// Account identifier this schema applies to
    pub account: String,
    /// Whether the export starts with a header row
    pub has_header: bool,
    /// Column names assigned to header-less exports, in file order
    #[serde(default)]
    pub headerless_columns: Vec<String>,
    /// Source column for Date
    pub date_column: Option<String>,
    /// Source column for Transaction (type label)
    pub kind_column: Option<String>,
    /// Source columns joined into Description
    pub description_columns: Vec<String>,
    /// Source column(s) for Amount
    pub amount: AmountColumns,
    /// Source column for Balance
    pub balance_column: Option<String>,
    /// Primary date format (strftime)
    pub date_format: String,
    /// Field delimiter
    pub delimiter: char,
}

impl AccountSchema {
    /// Schema using the canonical column names directly
    pub fn generic() -> Self {
        Self {
            account: "generic".to_string(),
            has_header: true,
            headerless_columns: Vec::new(),
            date_column: Some("date".to_string()),
            kind_column: Some("transaction".to_string()),
            description_columns: vec!["description".to_string()],
            amount: AmountColumns::Single("amount".to_string()),
            balance_column: Some("balance".to_string()),
            date_format: "%Y-%m-%d".to_string(),
            delimiter: ',',
        }
    }

    /// Wealthsimple: lowercase canonical columns with a running balance
    pub fn wealthsimple() -> Self {
        Self {
            account: "wea".to_string(),
            ..Self::generic()
        }
    }

    /// Tangerine: Date, Transaction, Name, Memo, Amount (no balance)
    pub fn tangerine() -> Self {
        Self {
            account: "tan".to_string(),
            has_header: true,
            headerless_columns: Vec::new(),
            date_column: Some("Date".to_string()),
            kind_column: Some("Transaction".to_string()),
            description_columns: vec!["Name".to_string(), "Memo".to_string()],
            amount: AmountColumns::Single("Amount".to_string()),
            balance_column: None,
            date_format: "%m/%d/%Y".to_string(),
            delimiter: ',',
        }
    }

    /// Simplii: Date, Transaction Details, Funds Out, Funds In (no type column)
    pub fn simplii() -> Self {
        Self {
            account: "sim".to_string(),
            has_header: true,
            headerless_columns: Vec::new(),
            date_column: Some("Date".to_string()),
            kind_column: None,
            description_columns: vec!["Transaction Details".to_string()],
            amount: AmountColumns::Split {
                funds_in: "Funds In".to_string(),
                funds_out: "Funds Out".to_string(),
            },
            balance_column: None,
            date_format: "%m/%d/%Y".to_string(),
            delimiter: ',',
        }
    }

    /// TD Bank: no header; date, description, withdrawals, deposits, balance
    pub fn td_bank() -> Self {
        Self {
            account: "td".to_string(),
            has_header: false,
            headerless_columns: vec![
                "Date".to_string(),
                "Description".to_string(),
                "Withdrawals".to_string(),
                "Deposits".to_string(),
                "Balance".to_string(),
            ],
            date_column: Some("Date".to_string()),
            kind_column: None,
            description_columns: vec!["Description".to_string()],
            amount: AmountColumns::Split {
                funds_in: "Deposits".to_string(),
                funds_out: "Withdrawals".to_string(),
            },
            balance_column: Some("Balance".to_string()),
            date_format: "%m/%d/%Y".to_string(),
            delimiter: ',',
        }
    }

    /// Look up the built-in schema for an account identifier
    pub fn builtin(account: &str) -> Option<Self> {
        match account.to_lowercase().as_str() {
            "wea" => Some(Self::wealthsimple()),
            "tan" => Some(Self::tangerine()),
            "sim" => Some(Self::simplii()),
            "td" => Some(Self::td_bank()),
            "generic" => Some(Self::generic()),
            _ => None,
        }
    }

    /// Built-in schema for an account, falling back to [`AccountSchema::generic`]
    pub fn for_account(account: &str) -> Self {
        Self::builtin(account).unwrap_or_else(|| Self {
            account: account.to_lowercase(),
            ..Self::generic()
        })
    }

    /// Every source column this schema reads
    pub fn source_columns(&self) -> Vec<&str> {
        let mut columns = Vec::new();
        columns.extend(self.date_column.as_deref());
        columns.extend(self.kind_column.as_deref());
        columns.extend(self.description_columns.iter().map(String::as_str));
        match &self.amount {
            AmountColumns::Single(name) => columns.push(name.as_str()),
            AmountColumns::Split {
                funds_in,
                funds_out,
            } => {
                columns.push(funds_in.as_str());
                columns.push(funds_out.as_str());
            }
        }
        columns.extend(self.balance_column.as_deref());
        columns
    }
}

impl Default for AccountSchema {
    fn default() -> Self {
        Self::generic()
    }
}
