//! Statement file names
//!
//! Statement exports are named `YEAR_MONTH_ACCOUNT_TYPE.csv`, e.g.
//! `2024_03_td_cheq.csv`. The name carries the metadata attached to every row
//! read from the file.

use std::fmt;

/// Allow-lists a statement name is validated against
#[derive(Debug, Clone)]
pub struct NameRules {
    pub accounts: Vec<String>,
    pub account_types: Vec<String>,
    pub min_year: u16,
    pub max_year: u16,
}

/// Why a file name was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameIssue {
    /// Extension is not `.csv`
    NotCsv,
    /// Wrong number of `_`-separated parts
    WrongShape(usize),
    /// Year is not four digits
    BadYear(String),
    /// Year is outside the accepted range
    YearOutOfRange(u16),
    /// Month is not one of `01`..`12`
    BadMonth(String),
    /// Account is not in the allow-list
    UnknownAccount(String),
    /// Account type is not in the allow-list
    UnknownAccountType(String),
}

impl fmt::Display for NameIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotCsv => write!(f, "not a CSV file"),
            Self::WrongShape(parts) => write!(
                f,
                "expected YEAR_MONTH_ACCOUNT_TYPE, found {} part(s)",
                parts
            ),
            Self::BadYear(year) => write!(f, "invalid year '{}'", year),
            Self::YearOutOfRange(year) => write!(f, "year {} out of range", year),
            Self::BadMonth(month) => write!(f, "invalid month '{}'", month),
            Self::UnknownAccount(account) => write!(f, "unknown account '{}'", account),
            Self::UnknownAccountType(kind) => write!(f, "unknown account type '{}'", kind),
        }
    }
}

impl std::error::Error for NameIssue {}

/// A validated statement file name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatementName {
    pub year: u16,
    pub month: u8,
    /// Account identifier, lowercased (e.g. "td")
    pub account: String,
    /// Account type identifier, lowercased (e.g. "cheq")
    pub account_type: String,
}

impl StatementName {
    /// Parse and validate a file name (without directory)
    pub fn parse(file_name: &str, rules: &NameRules) -> Result<Self, NameIssue> {
        let stem = match file_name.rsplit_once('.') {
            Some((stem, ext)) if ext.eq_ignore_ascii_case("csv") => stem,
            _ => return Err(NameIssue::NotCsv),
        };

        let parts: Vec<&str> = stem.split('_').collect();
        if parts.len() != 4 {
            return Err(NameIssue::WrongShape(parts.len()));
        }

        let year_str = parts[0];
        if year_str.len() != 4 || !year_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(NameIssue::BadYear(year_str.to_string()));
        }
        let year: u16 = year_str
            .parse()
            .map_err(|_| NameIssue::BadYear(year_str.to_string()))?;
        if year < rules.min_year || year > rules.max_year {
            return Err(NameIssue::YearOutOfRange(year));
        }

        let month_str = parts[1];
        let month = match month_str.parse::<u8>() {
            Ok(m) if month_str.len() == 2 && (1..=12).contains(&m) => m,
            _ => return Err(NameIssue::BadMonth(month_str.to_string())),
        };

        let account = parts[2].to_lowercase();
        if !rules.accounts.iter().any(|a| a.eq_ignore_ascii_case(&account)) {
            return Err(NameIssue::UnknownAccount(parts[2].to_string()));
        }

        let account_type = parts[3].to_lowercase();
        if !rules
            .account_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(&account_type))
        {
            return Err(NameIssue::UnknownAccountType(parts[3].to_string()));
        }

        Ok(Self {
            year,
            month,
            account,
            account_type,
        })
    }

    /// Canonical file name for this statement
    pub fn file_name(&self) -> String {
        format!(
            "{}_{:02}_{}_{}.csv",
            self.year, self.month, self.account, self.account_type
        )
    }
}

impl fmt::Display for StatementName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{:02} {} {}",
            self.year, self.month, self.account, self.account_type
        )
    }
}
