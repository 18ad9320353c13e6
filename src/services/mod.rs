//! Service layer for statement-collate
//!
//! Each service borrows the settings and implements one stage of the
//! collation pipeline. `CollateService` chains them together.

pub mod budget;
pub mod collate;
pub mod discovery;
pub mod import;
pub mod transfer;

pub use budget::{BudgetComparison, BudgetRow, BudgetService};
pub use collate::{CollateService, RunOptions, RunSummary};
pub use discovery::{
    Classification, DiscoveryService, MissingStatement, RejectedFile, StatementFile,
};
pub use import::ImportService;
pub use transfer::{TransferReport, TransferService};
