use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use statement_collate::cli::{handle_files_command, handle_run_command, FilesArgs, RunArgs};
use statement_collate::config::{CollatePaths, Settings};
use statement_collate::logging::init_tracing;

#[derive(Parser)]
#[command(
    name = "collate",
    version,
    about = "Combine bank statement CSV exports into one spreadsheet",
    long_about = "Reads bank statement CSV files named YEAR_MONTH_ACCOUNT_TYPE.csv, \
                  maps each bank's column layout onto one schema and writes the \
                  combined transactions to a spreadsheet. Transfer matching and a \
                  budget comparison can be switched on per run or in the settings."
)]
struct Cli {
    /// Settings file to use instead of the one in the config directory
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Combine statements into one file (the default)
    Run(RunArgs),

    /// Show how the statement files are classified
    Files(FilesArgs),

    /// Show current configuration and paths
    Config,

    /// Write the default settings file
    Init,
}

fn load_settings(cli: &Cli, paths: &CollatePaths) -> Result<Settings> {
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::load_or_create(paths)?,
    };
    Ok(settings)
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let paths = CollatePaths::new()?;
    let settings = load_settings(&cli, &paths)?;

    match &cli.command {
        None => {
            handle_run_command(&settings, &RunArgs::default())?;
        }
        Some(Commands::Run(args)) => {
            handle_run_command(&settings, args)?;
        }
        Some(Commands::Files(args)) => handle_files_command(&settings, args)?,
        Some(Commands::Config) => {
            println!("statement-collate configuration");
            println!("===============================");
            println!("Config directory:   {}", paths.config_dir().display());
            match &cli.config {
                Some(path) => println!("Settings file:      {}", path.display()),
                None if paths.is_initialized() => {
                    println!("Settings file:      {}", paths.settings_file().display())
                }
                None => println!("Settings file:      (none, using defaults)"),
            }
            println!();
            println!("Settings:");
            println!("  Statements directory: {}", settings.statements_dir.display());
            println!("  Output file:          {}", settings.output_path().display());
            println!("  Accounts:             {}", settings.accounts.join(", "));
            println!("  Account types:        {}", settings.account_types.join(", "));
            println!(
                "  Years:                {}-{}",
                settings.min_year,
                settings.effective_max_year()
            );
            println!("  Detect transfers:     {}", settings.detect_transfers);
            println!("  Compare budget:       {}", settings.compare_budget);
            println!("  Formatted table:      {}", settings.formatted_table);
            println!("  Category rules:       {}", settings.category_rules.len());
            println!("  Budget categories:    {}", settings.budget.lines().len());
        }
        Some(Commands::Init) => {
            if paths.is_initialized() {
                println!(
                    "Settings file already exists: {}",
                    paths.settings_file().display()
                );
            } else {
                settings.save(&paths)?;
                println!("Wrote default settings to {}", paths.settings_file().display());
                println!();
                println!("Edit it to change the account lists, category rules or budget.");
            }
        }
    }

    Ok(())
}
