//! Core data models for statement-collate
//!
//! This module contains the data structures that flow through the pipeline:
//! statement names, per-account schemas, normalized transactions and the
//! budget table.

pub mod budget;
pub mod money;
pub mod schema;
pub mod statement;
pub mod transaction;

pub use budget::{BudgetLine, BudgetTable, CategoryRule};
pub use money::{Money, MoneyParseError};
pub use schema::{AccountSchema, AmountColumns, CANONICAL_COLUMNS};
pub use statement::{NameIssue, NameRules, StatementName};
pub use transaction::{SourceInfo, Transaction, TxnDate};
