//! User settings for statement-collate
//!
//! Every value has a hardcoded default, so the tool runs without any settings
//! file. A `settings.json` in the config directory (or one passed with
//! `--config`) overrides individual fields.

use std::path::{Path, PathBuf};

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::paths::CollatePaths;
use crate::error::CollateError;
use crate::models::{AccountSchema, BudgetLine, BudgetTable, CategoryRule, Money, NameRules};

/// User settings for statement-collate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Directory scanned for statement CSV files
    #[serde(default = "default_statements_dir")]
    pub statements_dir: PathBuf,

    /// Output spreadsheet; relative paths are resolved inside `statements_dir`
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,

    /// Account identifier allow-list
    #[serde(default = "default_accounts")]
    pub accounts: Vec<String>,

    /// Account type allow-list
    #[serde(default = "default_account_types")]
    pub account_types: Vec<String>,

    /// Earliest accepted statement year
    #[serde(default = "default_min_year")]
    pub min_year: u16,

    /// Latest accepted statement year (defaults to the current year)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_year: Option<u16>,

    /// Flag and pair transfers between own accounts
    #[serde(default)]
    pub detect_transfers: bool,

    /// Write a budget comparison sheet
    #[serde(default)]
    pub compare_budget: bool,

    /// Write the transactions as a styled spreadsheet table
    #[serde(default = "default_true")]
    pub formatted_table: bool,

    /// Description keywords that mark a transfer
    #[serde(default = "default_transfer_keywords")]
    pub transfer_keywords: Vec<String>,

    /// Description keyword to category rules, first match wins
    #[serde(default = "default_category_rules")]
    pub category_rules: Vec<CategoryRule>,

    /// Planned spending per category
    #[serde(default = "default_budget")]
    pub budget: BudgetTable,

    /// Schemas replacing the built-in layout for an account
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemas: Vec<AccountSchema>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_statements_dir() -> PathBuf {
    PathBuf::from("./statements")
}

fn default_output_file() -> PathBuf {
    PathBuf::from("combined_statements.xlsx")
}

fn default_accounts() -> Vec<String> {
    ["wea", "tan", "sim", "td"].map(String::from).to_vec()
}

fn default_account_types() -> Vec<String> {
    ["cheq", "bills", "credit"].map(String::from).to_vec()
}

fn default_min_year() -> u16 {
    2000
}

fn default_true() -> bool {
    true
}

fn default_transfer_keywords() -> Vec<String> {
    ["transfer", "tfr", "xfer", "e-transfer"]
        .map(String::from)
        .to_vec()
}

fn default_category_rules() -> Vec<CategoryRule> {
    [
        ("loblaws", "Groceries"),
        ("no frills", "Groceries"),
        ("sobeys", "Groceries"),
        ("metro", "Groceries"),
        ("uber eats", "Dining"),
        ("starbucks", "Dining"),
        ("tim hortons", "Dining"),
        ("restaurant", "Dining"),
        ("presto", "Transportation"),
        ("uber", "Transportation"),
        ("esso", "Transportation"),
        ("shell", "Transportation"),
        ("hydro", "Utilities"),
        ("enbridge", "Utilities"),
        ("rogers", "Utilities"),
        ("bell canada", "Utilities"),
        ("netflix", "Entertainment"),
        ("spotify", "Entertainment"),
        ("cineplex", "Entertainment"),
        ("amazon", "Shopping"),
        ("walmart", "Shopping"),
    ]
    .into_iter()
    .map(|(keyword, category)| CategoryRule::new(keyword, category))
    .collect()
}

fn default_budget() -> BudgetTable {
    BudgetTable::new(vec![
        BudgetLine::new("Groceries", Money::from_dollars_cents(400, 0)),
        BudgetLine::new("Dining", Money::from_dollars_cents(150, 0)),
        BudgetLine::new("Transportation", Money::from_dollars_cents(120, 0)),
        BudgetLine::new("Utilities", Money::from_dollars_cents(200, 0)),
        BudgetLine::new("Entertainment", Money::from_dollars_cents(100, 0)),
        BudgetLine::new("Shopping", Money::from_dollars_cents(150, 0)),
    ])
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            statements_dir: default_statements_dir(),
            output_file: default_output_file(),
            accounts: default_accounts(),
            account_types: default_account_types(),
            min_year: default_min_year(),
            max_year: None,
            detect_transfers: false,
            compare_budget: false,
            formatted_table: true,
            transfer_keywords: default_transfer_keywords(),
            category_rules: default_category_rules(),
            budget: default_budget(),
            schemas: Vec::new(),
        }
    }
}

impl Settings {
    /// Load settings from the config directory, or use defaults if no file exists
    pub fn load_or_create(paths: &CollatePaths) -> Result<Self, CollateError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            Self::load_from(&settings_path)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Load settings from an explicit file, which must exist
    pub fn load_from(path: &Path) -> Result<Self, CollateError> {
        if !path.is_file() {
            return Err(CollateError::file_not_found(path.display().to_string()));
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            CollateError::Io(format!(
                "Failed to read settings file {}: {}",
                path.display(),
                e
            ))
        })?;

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            CollateError::Config(format!("Failed to parse settings file: {}", e))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to the config directory
    pub fn save(&self, paths: &CollatePaths) -> Result<(), CollateError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            CollateError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| CollateError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Check the settings are usable
    pub fn validate(&self) -> Result<(), CollateError> {
        if self.accounts.is_empty() {
            return Err(CollateError::Validation("account list is empty".into()));
        }
        if self.account_types.is_empty() {
            return Err(CollateError::Validation("account type list is empty".into()));
        }
        let max_year = self.effective_max_year();
        if self.min_year > max_year {
            return Err(CollateError::Validation(format!(
                "min_year {} is after max_year {}",
                self.min_year, max_year
            )));
        }
        if let Some(schema) = self.schemas.iter().find(|s| !s.delimiter.is_ascii()) {
            return Err(CollateError::Validation(format!(
                "delimiter '{}' for account '{}' is not a single-byte character",
                schema.delimiter, schema.account
            )));
        }
        Ok(())
    }

    /// Latest accepted year, defaulting to the current calendar year
    pub fn effective_max_year(&self) -> u16 {
        self.max_year
            .unwrap_or_else(|| chrono::Local::now().year() as u16)
    }

    /// Allow-lists used to validate statement file names
    pub fn name_rules(&self) -> NameRules {
        NameRules {
            accounts: self.accounts.clone(),
            account_types: self.account_types.clone(),
            min_year: self.min_year,
            max_year: self.effective_max_year(),
        }
    }

    /// Schema for an account: a configured override, else the built-in layout
    pub fn schema_for(&self, account: &str) -> AccountSchema {
        self.schemas
            .iter()
            .find(|s| s.account.eq_ignore_ascii_case(account))
            .cloned()
            .unwrap_or_else(|| AccountSchema::for_account(account))
    }

    /// Resolved output path
    pub fn output_path(&self) -> PathBuf {
        if self.output_file.is_absolute() {
            self.output_file.clone()
        } else {
            self.statements_dir.join(&self.output_file)
        }
    }

    /// Category for a description from the first matching rule
    pub fn categorize(&self, description: &str) -> Option<&str> {
        self.category_rules
            .iter()
            .find(|rule| rule.matches(description))
            .map(|rule| rule.category.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AmountColumns;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.accounts, vec!["wea", "tan", "sim", "td"]);
        assert_eq!(settings.account_types, vec!["cheq", "bills", "credit"]);
        assert!(!settings.detect_transfers);
        assert!(!settings.compare_budget);
        assert!(settings.formatted_table);
        assert_eq!(
            settings.output_path(),
            PathBuf::from("./statements").join("combined_statements.xlsx")
        );
        settings.validate().unwrap();
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CollatePaths::with_config_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.detect_transfers = true;
        settings.max_year = Some(2025);
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert!(loaded.detect_transfers);
        assert_eq!(loaded.max_year, Some(2025));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.json");
        std::fs::write(&path, r#"{ "accounts": ["td"], "compare_budget": true }"#).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.accounts, vec!["td"]);
        assert!(loaded.compare_budget);
        assert_eq!(loaded.min_year, 2000);
        assert!(!loaded.budget.is_empty());
    }

    #[test]
    fn test_missing_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = Settings::load_from(&temp_dir.path().join("nope.json")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_year_range() {
        let settings = Settings {
            min_year: 2030,
            max_year: Some(2020),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_non_ascii_delimiter_is_rejected() {
        let mut settings = Settings::default();
        settings.schemas.push(AccountSchema {
            account: "wea".into(),
            delimiter: '§',
            ..AccountSchema::generic()
        });
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("'§'"));

        settings.schemas[0].delimiter = ';';
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_schema_override() {
        let mut settings = Settings::default();
        settings.schemas.push(AccountSchema {
            account: "td".into(),
            ..AccountSchema::generic()
        });

        let td = settings.schema_for("TD");
        assert!(td.has_header);
        assert_eq!(td.amount, AmountColumns::Single("amount".into()));
        assert!(matches!(
            settings.schema_for("sim").amount,
            AmountColumns::Split { .. }
        ));
    }

    #[test]
    fn test_categorize_first_match_wins() {
        let settings = Settings::default();
        assert_eq!(settings.categorize("UBER EATS ORDER"), Some("Dining"));
        assert_eq!(settings.categorize("UBER TRIP"), Some("Transportation"));
        assert_eq!(settings.categorize("Mystery vendor"), None);
    }
}
