//! Statement discovery service
//!
//! Finds statement CSV files and buckets them by whether their names follow
//! `YEAR_MONTH_ACCOUNT_TYPE.csv`. Malformed names are logged and skipped.

use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::{CollateError, CollateResult};
use crate::models::{NameIssue, NameRules, StatementName};

/// A file whose name passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementFile {
    pub path: PathBuf,
    pub name: StatementName,
}

/// A file that was rejected, with the reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// An account/type/month combination with no statement file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingStatement {
    pub account: String,
    pub account_type: String,
    pub month: u8,
}

impl MissingStatement {
    /// Glob-style pattern the file would have matched
    pub fn pattern(&self) -> String {
        format!("*_{:02}_{}_{}.csv", self.month, self.account, self.account_type)
    }
}

/// Files bucketed by name validity
#[derive(Debug, Clone, Default)]
pub struct Classification {
    /// Statement files with valid names, in processing order
    pub valid: Vec<StatementFile>,
    /// Explicitly listed CSV files that do not use the statement naming scheme
    pub unnamed: Vec<PathBuf>,
    /// CSV files that were rejected
    pub invalid: Vec<RejectedFile>,
    /// Files that are not CSV
    pub non_csv: Vec<PathBuf>,
}

impl Classification {
    /// Number of files that will be read
    pub fn readable_count(&self) -> usize {
        self.valid.len() + self.unnamed.len()
    }

    /// Move a file to the invalid bucket after a failed import
    pub fn reject(&mut self, path: &Path, reason: impl Into<String>) {
        self.valid.retain(|f| f.path != path);
        self.unnamed.retain(|p| p != path);
        self.invalid.push(RejectedFile {
            path: path.to_path_buf(),
            reason: reason.into(),
        });
    }
}

/// Service for finding and classifying statement files
pub struct DiscoveryService<'a> {
    settings: &'a Settings,
    rules: NameRules,
    /// Files the directory scan leaves out, such as the run's own output
    skipped: Vec<PathBuf>,
}

impl<'a> DiscoveryService<'a> {
    /// Create a new discovery service
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            rules: settings.name_rules(),
            skipped: Vec::new(),
        }
    }

    /// Leave a file out of directory scans
    pub fn skipping(mut self, path: impl Into<PathBuf>) -> Self {
        self.skipped.push(path.into());
        self
    }

    fn is_skipped(&self, path: &Path) -> bool {
        self.skipped.iter().any(|skip| {
            skip == path
                || matches!(
                    (skip.canonicalize(), path.canonicalize()),
                    (Ok(a), Ok(b)) if a == b
                )
        })
    }

    /// Classify every regular file in a directory
    pub fn classify_directory(&self, dir: &Path) -> CollateResult<Classification> {
        if !dir.is_dir() {
            return Err(CollateError::directory_not_found(dir.display().to_string()));
        }

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && !self.is_skipped(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        tracing::debug!(dir = %dir.display(), files = paths.len(), "scanning statements directory");

        let mut classification = Classification::default();
        for path in paths {
            match self.parse_path(&path) {
                Ok(name) => classification.valid.push(StatementFile { path, name }),
                Err(NameIssue::NotCsv) => classification.non_csv.push(path),
                Err(issue) => {
                    tracing::warn!(file = %path.display(), %issue, "skipping statement with invalid name");
                    classification.invalid.push(RejectedFile {
                        path,
                        reason: issue.to_string(),
                    });
                }
            }
        }

        self.sort_valid(&mut classification.valid);
        Ok(classification)
    }

    /// Classify an explicit list of files
    ///
    /// CSV files whose names are not shaped like statement names are kept as
    /// `unnamed` and read with the generic schema. Names that are shaped
    /// correctly but fail validation are rejected.
    pub fn classify_paths(&self, paths: &[PathBuf]) -> Classification {
        let mut classification = Classification::default();
        for path in paths {
            if !path.is_file() {
                tracing::warn!(file = %path.display(), "skipping missing file");
                classification.invalid.push(RejectedFile {
                    path: path.clone(),
                    reason: "file not found".to_string(),
                });
                continue;
            }
            match self.parse_path(path) {
                Ok(name) => classification.valid.push(StatementFile {
                    path: path.clone(),
                    name,
                }),
                Err(NameIssue::NotCsv) => classification.non_csv.push(path.clone()),
                Err(NameIssue::WrongShape(_)) => classification.unnamed.push(path.clone()),
                Err(issue) => {
                    tracing::warn!(file = %path.display(), %issue, "skipping statement with invalid name");
                    classification.invalid.push(RejectedFile {
                        path: path.clone(),
                        reason: issue.to_string(),
                    });
                }
            }
        }
        self.sort_valid(&mut classification.valid);
        classification
    }

    /// Every account/type/month combination without a valid file, in any year
    pub fn missing_combinations(&self, classification: &Classification) -> Vec<MissingStatement> {
        let mut missing = Vec::new();
        for account in &self.settings.accounts {
            for account_type in &self.settings.account_types {
                for month in 1..=12u8 {
                    let found = classification.valid.iter().any(|f| {
                        f.name.account.eq_ignore_ascii_case(account)
                            && f.name.account_type.eq_ignore_ascii_case(account_type)
                            && f.name.month == month
                    });
                    if !found {
                        missing.push(MissingStatement {
                            account: account.to_lowercase(),
                            account_type: account_type.to_lowercase(),
                            month,
                        });
                    }
                }
            }
        }
        missing
    }

    fn parse_path(&self, path: &Path) -> Result<StatementName, NameIssue> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or(NameIssue::NotCsv)?;
        StatementName::parse(file_name, &self.rules)
    }

    /// Order by account, then account type (allow-list order), month, year
    fn sort_valid(&self, files: &mut [StatementFile]) {
        let position = |list: &[String], value: &str| {
            list.iter()
                .position(|v| v.eq_ignore_ascii_case(value))
                .unwrap_or(usize::MAX)
        };
        files.sort_by(|a, b| {
            let key_a = (
                position(&self.settings.accounts, &a.name.account),
                position(&self.settings.account_types, &a.name.account_type),
                a.name.month,
                a.name.year,
            );
            let key_b = (
                position(&self.settings.accounts, &b.name.account),
                position(&self.settings.account_types, &b.name.account_type),
                b.name.month,
                b.name.year,
            );
            key_a.cmp(&key_b).then_with(|| a.path.cmp(&b.path))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, "").unwrap();
        path
    }

    fn settings() -> Settings {
        Settings {
            max_year: Some(2030),
            ..Settings::default()
        }
    }

    #[test]
    fn test_classify_directory_buckets() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "2024_01_td_cheq.csv");
        touch(temp_dir.path(), "2024_13_td_cheq.csv");
        touch(temp_dir.path(), "2024_02_rbc_cheq.csv");
        touch(temp_dir.path(), "notes.txt");
        std::fs::create_dir(temp_dir.path().join("archive")).unwrap();

        let settings = settings();
        let service = DiscoveryService::new(&settings);
        let result = service.classify_directory(temp_dir.path()).unwrap();

        assert_eq!(result.valid.len(), 1);
        assert_eq!(result.valid[0].name.account, "td");
        assert_eq!(result.invalid.len(), 2);
        assert!(result
            .invalid
            .iter()
            .any(|f| f.reason == "invalid month '13'"));
        assert_eq!(result.non_csv.len(), 1);
    }

    #[test]
    fn test_valid_files_follow_allow_list_order() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "2024_02_td_cheq.csv");
        touch(temp_dir.path(), "2023_02_wea_bills.csv");
        touch(temp_dir.path(), "2024_01_wea_cheq.csv");
        touch(temp_dir.path(), "2023_01_wea_cheq.csv");

        let settings = settings();
        let service = DiscoveryService::new(&settings);
        let result = service.classify_directory(temp_dir.path()).unwrap();

        let names: Vec<String> = result.valid.iter().map(|f| f.name.file_name()).collect();
        assert_eq!(
            names,
            vec![
                "2023_01_wea_cheq.csv",
                "2024_01_wea_cheq.csv",
                "2023_02_wea_bills.csv",
                "2024_02_td_cheq.csv",
            ]
        );
    }

    #[test]
    fn test_skipped_output_is_not_classified() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "2024_01_td_cheq.csv");
        touch(temp_dir.path(), "combined_statements.csv");

        let settings = settings();
        let service = DiscoveryService::new(&settings)
            .skipping(temp_dir.path().join("combined_statements.csv"));
        let result = service.classify_directory(temp_dir.path()).unwrap();

        assert_eq!(result.valid.len(), 1);
        assert!(result.invalid.is_empty());
    }

    #[test]
    fn test_missing_directory_is_error() {
        let settings = settings();
        let service = DiscoveryService::new(&settings);
        let err = service
            .classify_directory(Path::new("/definitely/not/here"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_classify_explicit_paths() {
        let temp_dir = TempDir::new().unwrap();
        let statement = touch(temp_dir.path(), "2024_05_sim_credit.csv");
        let data = touch(temp_dir.path(), "data.csv");
        let bad = touch(temp_dir.path(), "2024_05_sim_loans.csv");
        let missing = temp_dir.path().join("gone.csv");

        let settings = settings();
        let service = DiscoveryService::new(&settings);
        let result = service.classify_paths(&[statement, data.clone(), bad, missing]);

        assert_eq!(result.valid.len(), 1);
        assert_eq!(result.unnamed, vec![data]);
        assert_eq!(result.invalid.len(), 2);
        assert_eq!(result.readable_count(), 2);
    }

    #[test]
    fn test_missing_combinations() {
        let settings = Settings {
            accounts: vec!["td".into()],
            account_types: vec!["cheq".into()],
            max_year: Some(2030),
            ..Settings::default()
        };
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "2024_01_td_cheq.csv");
        touch(temp_dir.path(), "2023_03_td_cheq.csv");

        let service = DiscoveryService::new(&settings);
        let result = service.classify_directory(temp_dir.path()).unwrap();
        let missing = service.missing_combinations(&result);

        assert_eq!(missing.len(), 10);
        assert!(missing.iter().all(|m| m.month != 1 && m.month != 3));
        assert_eq!(missing[0].pattern(), "*_02_td_cheq.csv");
    }

    #[test]
    fn test_reject_moves_file_to_invalid() {
        let mut classification = Classification::default();
        let path = PathBuf::from("data.csv");
        classification.unnamed.push(path.clone());

        classification.reject(&path, "no recognizable columns");
        assert!(classification.unnamed.is_empty());
        assert_eq!(classification.invalid[0].reason, "no recognizable columns");
    }
}
