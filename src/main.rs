use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;

use fintrack::cli::{
    handle_add_command, handle_delete_command, handle_report_command, handle_view_command,
    AddArgs, DeleteArgs, PeriodArgs, ReportCommands,
};
use fintrack::config::{paths::FinPaths, settings::Settings};
use fintrack::storage::Storage;

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Command-line tracker for personal income and expenses",
    long_about = "fintrack records income and expense transactions in a delimited \
                  file, lists them by period and reports totals by category, by \
                  source and overall balance."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add an expense or an income
    Add(AddArgs),

    /// List transactions, optionally restricted to a period
    #[command(alias = "list")]
    View(PeriodArgs),

    /// Generate reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Delete a transaction by ID or position
    #[command(alias = "rm")]
    Delete(DeleteArgs),

    /// Show current configuration and paths
    Config {
        /// Write the current settings to the settings file if it doesn't exist
        #[arg(long)]
        init: bool,
    },

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = FinPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let storage = Storage::new(paths.clone(), &settings)?;

    match cli.command {
        Some(Commands::Add(args)) => {
            handle_add_command(&storage, &settings, args)?;
        }
        Some(Commands::View(period)) => {
            handle_view_command(&storage, &settings, period)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Delete(args)) => {
            handle_delete_command(&storage, &settings, args)?;
        }
        Some(Commands::Config { init }) => {
            if init {
                if paths.settings_file().exists() {
                    println!(
                        "Settings file already exists: {}",
                        paths.settings_file().display()
                    );
                } else {
                    settings.save(&paths)?;
                    println!("Settings written to: {}", paths.settings_file().display());
                }
                println!();
            }
            println!("fintrack Configuration");
            println!("======================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Transactions file: {}", paths.transactions_file().display());
            println!("Settings file:     {}", paths.settings_file().display());
            println!("Audit log:         {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Delimiter:       {}", settings.delimiter);
        }
        Some(Commands::History { count }) => {
            let entries = storage.audit().read_recent(count)?;
            if entries.is_empty() {
                println!("No history yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        None => {
            println!("fintrack - track income and expenses");
            println!();
            println!("Run 'fintrack --help' for usage information.");
        }
    }

    Ok(())
}
