//! Transaction display formatting
//!
//! Renders stored records as a table for `view` and as a detail block for
//! `add` / `delete` confirmations.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDateTime;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::models::period::INPUT_DATE_FORMAT;
use crate::models::{Money, Record, TransactionKind};

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category/Source")]
    group: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl RecordRow {
    fn from_record(record: &Record, settings: &Settings) -> Self {
        let txn = &record.transaction;
        let (_, group) = txn.kind.label();
        Self {
            id: record.id.to_string(),
            date: format_date(txn.date, &settings.date_format),
            kind: txn.transaction_type().to_string(),
            description: truncate(&txn.description, 32),
            group: group.to_string(),
            amount: txn.amount.format_with_symbol(&settings.currency_symbol),
        }
    }
}

/// Format records as a table, followed by income/expense totals
pub fn format_record_list(records: &[Record], settings: &Settings) -> String {
    if records.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows: Vec<RecordRow> = records
        .iter()
        .map(|r| RecordRow::from_record(r, settings))
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::last()).with(Alignment::right()));

    let totals = records.iter().try_fold(
        (Money::zero(), Money::zero()),
        |(income, expense), r| match r.transaction.kind {
            TransactionKind::Income { .. } => {
                Some((income.checked_add(r.transaction.amount)?, expense))
            }
            TransactionKind::Expense { .. } => {
                Some((income, expense.checked_add(r.transaction.amount)?))
            }
        },
    );

    let mut output = table.to_string();
    output.push('\n');
    match totals {
        Some((income, expense)) => output.push_str(&format!(
            "{} transaction(s), income {}, expense {}\n",
            records.len(),
            income.format_with_symbol(&settings.currency_symbol),
            expense.format_with_symbol(&settings.currency_symbol)
        )),
        None => output.push_str(&format!(
            "{} transaction(s), totals too large to show\n",
            records.len()
        )),
    }
    output
}

/// Format one record for display
pub fn format_record_details(record: &Record, settings: &Settings) -> String {
    let txn = &record.transaction;
    let (label, value) = txn.kind.label();

    let mut output = String::new();
    output.push_str(&format!("Transaction: {}\n", record.id));
    output.push_str(&format!("Type:        {}\n", txn.transaction_type()));
    output.push_str(&format!(
        "Date:        {}\n",
        format_date(txn.date, &settings.date_format)
    ));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(&settings.currency_symbol)
    ));
    output.push_str(&format!("Description: {}\n", txn.description));
    output.push_str(&format!("{:<12} {}\n", format!("{}:", label), value));
    output
}

/// Format a date with the configured pattern, falling back to `YYYY-MM-DD`
/// when the pattern is invalid
fn format_date(date: NaiveDateTime, pattern: &str) -> String {
    let items = StrftimeItems::new(pattern);
    if items.clone().any(|item| matches!(item, Item::Error)) {
        return date.format(INPUT_DATE_FORMAT).to_string();
    }
    date.format_with_items(items).to_string()
}

/// Truncate a string to a maximum number of characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
