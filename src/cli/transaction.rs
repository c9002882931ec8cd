//! Transaction CLI commands
//!
//! Implements the `add`, `view` and `delete` commands.

use clap::{ArgGroup, Args};

use super::period::PeriodArgs;
use crate::config::Settings;
use crate::display::{format_record_details, format_record_list};
use crate::error::{FinError, FinResult};
use crate::models::period::{parse_date, start_of_day};
use crate::models::{Money, TransactionId, TransactionType};
use crate::services::{CreateTransactionInput, TransactionService};
use crate::storage::Storage;

/// Arguments for `add`
#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("kind")
        .required(true)
        .args(["expense", "income"])
))]
pub struct AddArgs {
    /// What the money was for
    #[arg(long)]
    pub description: String,

    /// Amount, e.g. "45" or "45.50"
    #[arg(long, allow_hyphen_values = true)]
    pub sum: String,

    /// Transaction date (YYYY-MM-DD), defaults to now
    #[arg(long)]
    pub date: Option<String>,

    /// Record an expense (requires --category)
    #[arg(long)]
    pub expense: bool,

    /// Record an income (requires --source)
    #[arg(long)]
    pub income: bool,

    /// Expense category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Income source
    #[arg(short, long)]
    pub source: Option<String>,
}

/// Arguments for `delete`
#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("target")
        .required(true)
        .args(["id", "position"])
))]
pub struct DeleteArgs {
    /// Transaction ID (e.g. "7" or "#7")
    pub id: Option<String>,

    /// Zero-based position in the stored order
    #[arg(long)]
    pub position: Option<usize>,
}

/// Handle `add`
pub fn handle_add_command(storage: &Storage, settings: &Settings, args: AddArgs) -> FinResult<()> {
    let amount = Money::parse(&args.sum).map_err(|e| {
        FinError::Validation(format!(
            "Invalid amount '{}': {}. Use a format like '45' or '45.50'",
            args.sum, e
        ))
    })?;

    let date = args
        .date
        .as_deref()
        .map(parse_date)
        .transpose()?
        .map(start_of_day);

    let transaction_type = if args.income {
        TransactionType::Income
    } else {
        TransactionType::Expense
    };

    let input = CreateTransactionInput {
        transaction_type,
        description: args.description,
        amount,
        date,
        category: args.category,
        source: args.source,
    };

    let record = TransactionService::new(storage).create(input)?;

    println!("Added {}", record);
    print!("{}", format_record_details(&record, settings));

    Ok(())
}

/// Handle `view`
///
/// An unreadable store shows as empty.
pub fn handle_view_command(
    storage: &Storage,
    settings: &Settings,
    period: PeriodArgs,
) -> FinResult<()> {
    let range = period.resolve_now()?;
    let records = TransactionService::new(storage).list(&range);

    println!("Transactions: {}", range);
    print!("{}", format_record_list(&records, settings));

    Ok(())
}

/// Handle `delete`
pub fn handle_delete_command(
    storage: &Storage,
    settings: &Settings,
    args: DeleteArgs,
) -> FinResult<()> {
    let service = TransactionService::new(storage);

    let removed = match (args.id, args.position) {
        (Some(id), _) => {
            let id: TransactionId = id.parse().map_err(|_| {
                FinError::Validation(format!("Invalid transaction ID: '{}'", id))
            })?;
            service.delete(id)?
        }
        (None, Some(position)) => service.delete_at(position)?,
        (None, None) => {
            return Err(FinError::Validation(
                "Give a transaction ID or --position".into(),
            ))
        }
    };

    println!("Deleted transaction {}", removed.id);
    print!("{}", format_record_details(&removed, settings));

    Ok(())
}
