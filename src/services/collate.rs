//! Collation pipeline
//!
//! Runs every stage once, top to bottom: classify the input files, normalize
//! each one, concatenate, optionally detect transfers and compare against the
//! budget, then write the output file.

use std::path::{Path, PathBuf};

use super::budget::{BudgetComparison, BudgetService};
use super::discovery::{Classification, DiscoveryService, MissingStatement};
use super::import::ImportService;
use super::transfer::{TransferReport, TransferService};
use crate::config::Settings;
use crate::error::{CollateError, CollateResult};
use crate::export::{self, OutputFormat, WriteOptions};
use crate::models::Transaction;

/// Per-run choices, seeded from settings and overridden by the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Explicit input files; when empty the statements directory is scanned
    pub files: Vec<PathBuf>,
    pub statements_dir: PathBuf,
    pub output: PathBuf,
    pub format: OutputFormat,
    pub detect_transfers: bool,
    pub compare_budget: bool,
    pub formatted_table: bool,
}

impl RunOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            files: Vec::new(),
            statements_dir: settings.statements_dir.clone(),
            output: settings.output_path(),
            format: OutputFormat::Xlsx,
            detect_transfers: settings.detect_transfers,
            compare_budget: settings.compare_budget,
            formatted_table: settings.formatted_table,
        }
    }

    pub fn with_files(mut self, files: Vec<PathBuf>) -> Self {
        self.files = files;
        self
    }

    pub fn with_output(mut self, output: PathBuf) -> Self {
        self.output = output;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    fn write_options(&self) -> WriteOptions {
        WriteOptions {
            formatted_table: self.formatted_table,
            include_transfers: self.detect_transfers,
        }
    }
}

/// What a run did
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub classification: Classification,
    /// Only filled when a directory was scanned
    pub missing: Vec<MissingStatement>,
    pub rows: usize,
    pub transfers: Option<TransferReport>,
    pub budget: Option<BudgetComparison>,
    /// Written file; `None` when there was no data to write
    pub output: Option<PathBuf>,
}

impl RunSummary {
    pub fn has_data(&self) -> bool {
        self.output.is_some()
    }

    /// Path of the written file
    pub fn output_path(&self) -> CollateResult<&Path> {
        self.output.as_deref().ok_or(CollateError::NoData)
    }
}

/// Service that runs the whole pipeline
pub struct CollateService<'a> {
    settings: &'a Settings,
}

impl<'a> CollateService<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Classify the run's input files
    ///
    /// A directory scan skips the output file, which may live alongside the
    /// statements.
    pub fn classify(&self, options: &RunOptions) -> CollateResult<Classification> {
        let discovery = DiscoveryService::new(self.settings).skipping(&options.output);
        if options.files.is_empty() {
            discovery.classify_directory(&options.statements_dir)
        } else {
            Ok(discovery.classify_paths(&options.files))
        }
    }

    /// Normalize every readable file, rejecting the ones that fail
    pub fn collect(&self, classification: &mut Classification) -> Vec<Transaction> {
        let importer = ImportService::new(self.settings);
        let mut rows = Vec::new();
        let mut failed = Vec::new();

        let inputs = classification
            .valid
            .iter()
            .map(|f| (f.path.clone(), Some(&f.name)))
            .chain(classification.unnamed.iter().map(|p| (p.clone(), None)));

        for (path, name) in inputs {
            match importer.normalize_file(&path, name) {
                Ok(mut transactions) => rows.append(&mut transactions),
                Err(e) => {
                    tracing::warn!(file = %path.display(), error = %e, "skipping unreadable statement");
                    let reason = match e {
                        CollateError::Import { reason, .. } => reason,
                        other => other.to_string(),
                    };
                    failed.push((path, reason));
                }
            }
        }

        for (path, reason) in failed {
            classification.reject(&path, reason);
        }
        rows
    }

    /// Run the pipeline
    ///
    /// A run that finds no rows writes nothing and returns a summary with no
    /// output path.
    pub fn run(&self, options: &RunOptions) -> CollateResult<RunSummary> {
        let mut classification = self.classify(options)?;
        tracing::info!(
            valid = classification.valid.len(),
            unnamed = classification.unnamed.len(),
            invalid = classification.invalid.len(),
            "classified statement files"
        );

        let missing = if options.files.is_empty() {
            DiscoveryService::new(self.settings).missing_combinations(&classification)
        } else {
            Vec::new()
        };

        let mut rows = self.collect(&mut classification);
        tracing::info!(rows = rows.len(), "combined statements");

        let mut summary = RunSummary {
            classification,
            missing,
            rows: rows.len(),
            ..RunSummary::default()
        };

        if rows.is_empty() {
            tracing::warn!("{}", CollateError::NoData);
            return Ok(summary);
        }

        if options.detect_transfers {
            let service = TransferService::new(self.settings);
            summary.transfers = Some(service.reconcile(&mut rows));
        }

        if options.compare_budget {
            let service = BudgetService::new(&self.settings.budget);
            summary.budget = Some(service.compare(&rows));
        }

        let write_options = options.write_options();
        match options.format {
            OutputFormat::Xlsx => export::write_workbook(
                &options.output,
                &rows,
                summary.budget.as_ref(),
                &write_options,
            )?,
            OutputFormat::Csv => {
                export::write_transactions_csv(&options.output, &rows, &write_options)?
            }
        }

        summary.output = Some(options.output.clone());
        Ok(summary)
    }
}
