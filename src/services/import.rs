//! Statement import service
//!
//! Reads one bank export and maps its columns onto the canonical schema,
//! using the [`AccountSchema`] for the account the file belongs to.
//! Missing canonical columns get placeholders; split "funds in / funds out"
//! columns are folded into one signed amount.

use std::io::Read;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use csv::{ReaderBuilder, StringRecord, Trim};

use crate::config::Settings;
use crate::error::{CollateError, CollateResult};
use crate::models::{
    AccountSchema, AmountColumns, Money, SourceInfo, StatementName, Transaction, TxnDate,
};

/// Fallback date formats tried after the schema's primary format
const DATE_FORMATS: [&str; 9] = [
    "%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%d/%m/%Y", "%Y/%m/%d", "%m-%d-%Y", "%d-%b-%Y",
    "%b %d, %Y", "%Y%m%d",
];

/// Parsed years outside this range are treated as a format mismatch
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1900..=9999;

/// Separator used when several source columns feed the description
const DESCRIPTION_SEPARATOR: &str = " - ";

/// Column indices resolved against a file's header row
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResolvedColumns {
    date: Option<usize>,
    kind: Option<usize>,
    description: Vec<usize>,
    amount: ResolvedAmount,
    balance: Option<usize>,
    category: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ResolvedAmount {
    Single(Option<usize>),
    Split {
        funds_in: Option<usize>,
        funds_out: Option<usize>,
    },
}

impl ResolvedColumns {
    fn found_any(&self) -> bool {
        let amount_found = match self.amount {
            ResolvedAmount::Single(col) => col.is_some(),
            ResolvedAmount::Split {
                funds_in,
                funds_out,
            } => funds_in.is_some() || funds_out.is_some(),
        };
        self.date.is_some()
            || self.kind.is_some()
            || !self.description.is_empty()
            || amount_found
            || self.balance.is_some()
    }
}

/// Service for normalizing statement exports
pub struct ImportService<'a> {
    settings: &'a Settings,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Normalize one statement file
    ///
    /// Files with a statement name use that account's schema and get its
    /// metadata attached; other files are read with the generic schema.
    pub fn normalize_file(
        &self,
        path: &Path,
        name: Option<&StatementName>,
    ) -> CollateResult<Vec<Transaction>> {
        let display_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown.csv")
            .to_string();

        let schema = match name {
            Some(name) => self.settings.schema_for(&name.account),
            None => AccountSchema::generic(),
        };

        let file = std::fs::File::open(path)
            .map_err(|e| CollateError::import(&display_name, format!("cannot open: {}", e)))?;

        let mut transactions = self
            .normalize_reader(file, &schema)
            .map_err(|reason| CollateError::import(&display_name, reason))?;

        if let Some(name) = name {
            let source = SourceInfo::from(name);
            for txn in &mut transactions {
                txn.source = Some(source.clone());
            }
        }

        tracing::debug!(
            file = %display_name,
            schema = %schema.account,
            rows = transactions.len(),
            "normalized statement"
        );

        Ok(transactions)
    }

    /// Normalize CSV data from a reader using a schema
    pub fn normalize_reader<R: Read>(
        &self,
        reader: R,
        schema: &AccountSchema,
    ) -> Result<Vec<Transaction>, String> {
        let delimiter = u8::try_from(schema.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                format!(
                    "delimiter '{}' is not a single-byte character",
                    schema.delimiter
                )
            })?;
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .delimiter(delimiter)
            .from_reader(reader);

        let mut records = Vec::new();
        for result in csv_reader.records() {
            let record = result.map_err(|e| format!("Error reading CSV record: {}", e))?;
            records.push(record);
        }

        let mut rows = records.into_iter();
        let mut first_line = 1;
        let headers = if schema.has_header {
            match rows.next() {
                Some(header) => {
                    first_line = 2;
                    header
                }
                None => return Ok(Vec::new()),
            }
        } else {
            StringRecord::from(schema.headerless_columns.clone())
        };

        let columns = self.resolve_columns(&headers, schema);
        if !columns.found_any() {
            return Err(format!(
                "no recognizable columns (expected some of: {})",
                schema.source_columns().join(", ")
            ));
        }

        let mut rows = rows.peekable();
        if !schema.has_header {
            // Some header-less exports occasionally come with a header after all
            if let Some(first) = rows.peek() {
                if self.matches_headerless_names(first, schema) {
                    rows.next();
                    first_line = 2;
                }
            }
        }

        let mut transactions = Vec::new();
        for (idx, record) in rows.enumerate() {
            if record.iter().all(|field| field.is_empty()) {
                continue;
            }
            let line = idx + first_line;
            let txn = self
                .parse_record(&record, &columns, schema)
                .map_err(|e| format!("line {}: {}", line, e))?;
            transactions.push(txn);
        }

        Ok(transactions)
    }

    /// Match schema column names against a header row, case-insensitively
    fn resolve_columns(&self, headers: &StringRecord, schema: &AccountSchema) -> ResolvedColumns {
        let find = |name: &str| {
            let wanted = name.trim().to_lowercase();
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim().to_lowercase() == wanted)
        };

        let amount = match &schema.amount {
            AmountColumns::Single(name) => ResolvedAmount::Single(find(name.as_str())),
            AmountColumns::Split {
                funds_in,
                funds_out,
            } => ResolvedAmount::Split {
                funds_in: find(funds_in.as_str()),
                funds_out: find(funds_out.as_str()),
            },
        };

        ResolvedColumns {
            date: schema.date_column.as_deref().and_then(find),
            kind: schema.kind_column.as_deref().and_then(find),
            description: schema
                .description_columns
                .iter()
                .filter_map(|name| find(name.as_str()))
                .collect(),
            amount,
            balance: schema.balance_column.as_deref().and_then(find),
            category: find("category"),
        }
    }

    /// Check if a record repeats the names assigned to a header-less export
    fn matches_headerless_names(&self, record: &StringRecord, schema: &AccountSchema) -> bool {
        !schema.headerless_columns.is_empty()
            && schema
                .headerless_columns
                .iter()
                .zip(record.iter())
                .all(|(name, field)| {
                    field.trim_start_matches('\u{feff}').eq_ignore_ascii_case(name)
                })
    }

    /// Parse a single CSV record into a canonical transaction
    fn parse_record(
        &self,
        record: &StringRecord,
        columns: &ResolvedColumns,
        schema: &AccountSchema,
    ) -> Result<Transaction, String> {
        let field = |col: Option<usize>| col.and_then(|c| record.get(c)).unwrap_or("").trim();

        let date_str = field(columns.date);
        let date = if date_str.is_empty() {
            TxnDate::default()
        } else {
            match self.parse_date(date_str, &schema.date_format) {
                Some(date) => TxnDate::Parsed(date),
                None => {
                    tracing::debug!(date = date_str, "keeping unparseable date as text");
                    TxnDate::Raw(date_str.to_string())
                }
            }
        };

        let amount = match columns.amount {
            ResolvedAmount::Single(col) => self.parse_optional_amount(field(col))?,
            ResolvedAmount::Split {
                funds_in,
                funds_out,
            } => {
                let inflow = self.parse_optional_amount(field(funds_in))?.abs();
                let outflow = self.parse_optional_amount(field(funds_out))?.abs();
                inflow - outflow
            }
        };

        let description = columns
            .description
            .iter()
            .map(|&col| field(Some(col)))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(DESCRIPTION_SEPARATOR);

        let kind = match field(columns.kind) {
            "" => Transaction::inferred_kind(amount).to_string(),
            kind => kind.to_string(),
        };

        let balance_str = field(columns.balance);
        let balance = if balance_str.is_empty() {
            None
        } else {
            match Money::parse(balance_str) {
                Ok(balance) => Some(balance),
                Err(e) => {
                    tracing::warn!(%e, "ignoring unparseable balance");
                    None
                }
            }
        };

        let category = match field(columns.category) {
            "" => self.settings.categorize(&description).map(str::to_string),
            category => Some(category.to_string()),
        };

        let mut txn = Transaction::new(date, kind, description, amount);
        txn.balance = balance;
        txn.category = category;
        Ok(txn)
    }

    /// Empty amount cells count as zero
    fn parse_optional_amount(&self, s: &str) -> Result<Money, String> {
        if s.is_empty() {
            return Ok(Money::zero());
        }
        Money::parse(s).map_err(|e| format!("Could not parse amount: {}", e))
    }

    /// Parse a date string using multiple format attempts
    ///
    /// `%Y` happily reads "24" as year 24, so a two-digit year only reaches
    /// the `%y` formats once the implausible year has been rejected.
    fn parse_date(&self, s: &str, primary_format: &str) -> Option<NaiveDate> {
        std::iter::once(primary_format)
            .chain(DATE_FORMATS)
            .filter_map(|format| NaiveDate::parse_from_str(s, format).ok())
            .find(|date| YEAR_RANGE.contains(&date.year()))
    }
}
