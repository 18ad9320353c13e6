//! Transaction model
//!
//! A single row of the unified statement table, after its source columns have
//! been mapped onto the canonical schema.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use super::statement::StatementName;

/// Date of a transaction as found in the export
///
/// Unparseable dates are kept as raw text rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TxnDate {
    Parsed(NaiveDate),
    Raw(String),
}

impl TxnDate {
    /// The parsed date, if there is one
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Parsed(date) => Some(*date),
            Self::Raw(_) => None,
        }
    }
}

impl Default for TxnDate {
    fn default() -> Self {
        Self::Raw(String::new())
    }
}

impl fmt::Display for TxnDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parsed(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Raw(raw) => write!(f, "{}", raw),
        }
    }
}

/// Where a row came from, taken from the statement file name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub year: u16,
    pub month: u8,
    pub account: String,
    pub account_type: String,
}

impl From<&StatementName> for SourceInfo {
    fn from(name: &StatementName) -> Self {
        Self {
            year: name.year,
            month: name.month,
            account: name.account.clone(),
            account_type: name.account_type.clone(),
        }
    }
}

/// A normalized statement transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction date
    pub date: TxnDate,

    /// Transaction-type label (e.g. "Debit", "Withdrawal", "e-Transfer")
    #[serde(rename = "transaction")]
    pub kind: String,

    /// Free-text description
    pub description: String,

    /// Signed amount (negative for outflow)
    pub amount: Money,

    /// Running balance, when the export provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<Money>,

    /// Spending category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Statement the row was read from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceInfo>,

    /// Whether the description marks this as a transfer between own accounts
    #[serde(default)]
    pub is_transfer: bool,

    /// Pair number shared by two matched transfer rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_pair: Option<usize>,
}

impl Transaction {
    /// Create a new transaction with no balance, category or source
    pub fn new(
        date: TxnDate,
        kind: impl Into<String>,
        description: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            date,
            kind: kind.into(),
            description: description.into(),
            amount,
            balance: None,
            category: None,
            source: None,
            is_transfer: false,
            transfer_pair: None,
        }
    }

    /// Placeholder type label for exports without a transaction-type column
    pub fn inferred_kind(amount: Money) -> &'static str {
        if amount.is_positive() {
            "Deposit"
        } else if amount.is_negative() {
            "Withdrawal"
        } else {
            ""
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date, self.kind, self.description, self.amount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inferred_kind() {
        assert_eq!(Transaction::inferred_kind(Money::from_cents(100)), "Deposit");
        assert_eq!(
            Transaction::inferred_kind(Money::from_cents(-100)),
            "Withdrawal"
        );
        assert_eq!(Transaction::inferred_kind(Money::zero()), "");
    }

    #[test]
    fn test_date_display() {
        let parsed = TxnDate::Parsed(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert_eq!(parsed.to_string(), "2024-03-09");
        assert_eq!(TxnDate::Raw("sometime".into()).to_string(), "sometime");
        assert!(TxnDate::default().as_date().is_none());
    }

    #[test]
    fn test_new_transaction_defaults() {
        let txn = Transaction::new(TxnDate::default(), "", "Coffee", Money::from_cents(-450));
        assert!(!txn.is_transfer);
        assert!(txn.transfer_pair.is_none());
        assert!(txn.balance.is_none());
        assert!(txn.source.is_none());
    }
}
