//! CLI commands for reports
//!
//! Provides the category, source and summary reports, each optionally
//! exported to a delimited file.

use chrono::Local;
use clap::Subcommand;
use log::warn;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use super::period::PeriodArgs;
use crate::config::Settings;
use crate::error::{FinError, FinResult};
use crate::reports::{GroupBy, GroupedReport, SummaryReport};
use crate::services::TransactionService;
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Expenses grouped by category
    Category {
        #[command(flatten)]
        period: PeriodArgs,

        /// Also write the report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show top N categories only
        #[arg(long)]
        top: Option<usize>,
    },

    /// Income grouped by source
    Source {
        #[command(flatten)]
        period: PeriodArgs,

        /// Also write the report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show top N sources only
        #[arg(long)]
        top: Option<usize>,
    },

    /// Total income, total expense and balance
    Summary {
        #[command(flatten)]
        period: PeriodArgs,

        /// Also write the report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> FinResult<()> {
    match cmd {
        ReportCommands::Category {
            period,
            output,
            top,
        } => handle_grouped_report(storage, settings, GroupBy::Category, period, output, top),
        ReportCommands::Source {
            period,
            output,
            top,
        } => handle_grouped_report(storage, settings, GroupBy::Source, period, output, top),
        ReportCommands::Summary { period, output } => {
            handle_summary_report(storage, settings, period, output)
        }
    }
}

/// Handle the category and source reports
fn handle_grouped_report(
    storage: &Storage,
    settings: &Settings,
    group_by: GroupBy,
    period: PeriodArgs,
    output: Option<PathBuf>,
    top: Option<usize>,
) -> FinResult<()> {
    let range = period.resolve_now()?;
    let records = TransactionService::new(storage).list(&range);

    let Some(report) = GroupedReport::generate(group_by, &records, range)? else {
        println!("No data for {} ({}).", group_by, range);
        return Ok(());
    };

    if let Some(path) = output {
        let delimiter = settings.delimiter_byte()?;
        write_report(&path, |writer| report.export_csv(writer, delimiter));
    }

    if let Some(n) = top {
        println!("Top {} {}: {}\n", n, group_by, range);
        for group in report.top(n) {
            println!(
                "{:<32} {:>14} {:>6.1}%",
                group.name,
                group.total.format_with_symbol(&settings.currency_symbol),
                group.percentage
            );
        }
    } else {
        print!("{}", report.format_terminal(&settings.currency_symbol));
    }

    Ok(())
}

/// Handle the summary report
fn handle_summary_report(
    storage: &Storage,
    settings: &Settings,
    period: PeriodArgs,
    output: Option<PathBuf>,
) -> FinResult<()> {
    let today = Local::now().date_naive();
    let range = period.resolve(today)?;
    let records = TransactionService::new(storage).list(&range);

    let report = SummaryReport::generate(&records, &range, today)?;

    if let Some(path) = output {
        let delimiter = settings.delimiter_byte()?;
        write_report(&path, |writer| report.export_csv(writer, delimiter));
    }

    print!("{}", report.format_terminal(&settings.currency_symbol));

    Ok(())
}

/// Write a report file; a failure is reported and the report is still shown
fn write_report<F>(path: &Path, export: F)
where
    F: FnOnce(&mut BufWriter<File>) -> FinResult<()>,
{
    match export_to_file(path, export) {
        Ok(()) => println!("Report written to: {}", path.display()),
        Err(e) => {
            warn!("Report export to {} failed: {}", path.display(), e);
            eprintln!("Error: {}", e);
        }
    }
}

fn export_to_file<F>(path: &Path, export: F) -> FinResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> FinResult<()>,
{
    let file = File::create(path).map_err(|e| {
        FinError::Export(format!(
            "Failed to create file {}: {}",
            path.display(),
            e
        ))
    })?;
    let mut writer = BufWriter::new(file);
    export(&mut writer)
}
