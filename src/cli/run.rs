//! Run CLI command
//!
//! Combines statements into one output file.

use std::path::PathBuf;

use clap::Args;

use crate::config::Settings;
use crate::display::format_run_summary;
use crate::error::CollateResult;
use crate::export::OutputFormat;
use crate::services::{CollateService, RunOptions, RunSummary};

/// Arguments for `collate run`
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Statement files to combine instead of scanning the statements directory
    pub files: Vec<PathBuf>,

    /// Statements directory
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Output file (relative paths are placed in the statements directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Flag and pair transfers between accounts
    #[arg(long)]
    pub transfers: bool,

    /// Add a budget comparison sheet
    #[arg(long)]
    pub budget: bool,

    /// Write a plain header row instead of a styled table
    #[arg(long)]
    pub plain: bool,
}

impl RunArgs {
    /// Merge the arguments over the configured defaults
    pub fn to_options(&self, settings: &Settings) -> RunOptions {
        let mut options = RunOptions::from_settings(settings);

        if let Some(dir) = &self.dir {
            options.statements_dir = dir.clone();
        }

        let output = self.output.clone().unwrap_or_else(|| settings.output_file.clone());
        options.output = if output.is_absolute() {
            output
        } else {
            options.statements_dir.join(output)
        };

        if let Some(format) = self.format {
            options.format = format;
            if self.output.is_none() {
                options.output.set_extension(format.extension());
            }
        } else if options
            .output
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        {
            options.format = OutputFormat::Csv;
        }

        options.files = self.files.clone();
        options.detect_transfers |= self.transfers;
        options.compare_budget |= self.budget;
        if self.plain {
            options.formatted_table = false;
        }
        options
    }
}

/// Handle the run command
pub fn handle_run_command(settings: &Settings, args: &RunArgs) -> CollateResult<RunSummary> {
    let options = args.to_options(settings);
    let summary = CollateService::new(settings).run(&options)?;
    print!("{}", format_run_summary(&summary));
    Ok(summary)
}
