//! Files CLI command
//!
//! Reports how the statement files would be classified without reading them.

use std::path::PathBuf;

use clap::Args;

use crate::config::Settings;
use crate::display::{format_classification, format_missing};
use crate::error::CollateResult;
use crate::export::OutputFormat;
use crate::services::DiscoveryService;

/// Arguments for `collate files`
#[derive(Args, Debug, Clone, Default)]
pub struct FilesArgs {
    /// Statements directory
    #[arg(short, long)]
    pub dir: Option<PathBuf>,
}

/// Handle the files command
pub fn handle_files_command(settings: &Settings, args: &FilesArgs) -> CollateResult<()> {
    let dir = args.dir.as_ref().unwrap_or(&settings.statements_dir);
    let output = settings.output_path();
    let service = DiscoveryService::new(settings)
        .skipping(output.with_extension(OutputFormat::Csv.extension()))
        .skipping(output);

    let classification = service.classify_directory(dir)?;
    let missing = service.missing_combinations(&classification);

    println!("Statements directory: {}", dir.display());
    println!();
    print!("{}", format_classification(&classification));
    println!();
    print!("{}", format_missing(&missing));

    Ok(())
}
