//! Income / expense summary report

use chrono::NaiveDate;
use std::io::Write;

use crate::error::{FinError, FinResult};
use crate::models::{DateRange, Money, Record};

/// Totals and balance for a period
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_income: Money,
    pub total_expense: Money,
    /// `total_income - total_expense`
    pub balance: Money,
    pub income_count: usize,
    pub expense_count: usize,
}

impl SummaryReport {
    /// Summarize the records inside `range`
    ///
    /// Unbounded ends of the range are reported as `today`. An empty set
    /// yields zero totals; totals that don't fit in [`Money`] are a
    /// validation error.
    pub fn generate(records: &[Record], range: &DateRange, today: NaiveDate) -> FinResult<Self> {
        let mut total_income = Money::zero();
        let mut total_expense = Money::zero();
        let mut income_count = 0;
        let mut expense_count = 0;

        for record in records
            .iter()
            .filter(|r| range.contains(r.transaction.date))
        {
            let amount = record.transaction.amount;
            if record.transaction.is_income() {
                total_income = total_income
                    .checked_add(amount)
                    .ok_or_else(|| too_large("Total income"))?;
                income_count += 1;
            } else {
                total_expense = total_expense
                    .checked_add(amount)
                    .ok_or_else(|| too_large("Total expense"))?;
                expense_count += 1;
            }
        }

        let balance = total_income
            .checked_sub(total_expense)
            .ok_or_else(|| too_large("Balance"))?;

        Ok(Self {
            start_date: range.start_date().unwrap_or(today),
            end_date: range.end_date().unwrap_or(today),
            total_income,
            total_expense,
            balance,
            income_count,
            expense_count,
        })
    }

    pub fn transaction_count(&self) -> usize {
        self.income_count + self.expense_count
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Summary: {} to {}\n",
            self.start_date, self.end_date
        ));
        output.push_str(&"=".repeat(44));
        output.push('\n');

        output.push_str(&format!(
            "{:<20} {:>14} {:>8}\n",
            "Total income",
            self.total_income.format_with_symbol(currency),
            self.income_count
        ));
        output.push_str(&format!(
            "{:<20} {:>14} {:>8}\n",
            "Total expense",
            self.total_expense.format_with_symbol(currency),
            self.expense_count
        ));
        output.push_str(&"-".repeat(44));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>14} {:>8}\n",
            "Balance",
            self.balance.format_with_symbol(currency),
            self.transaction_count()
        ));

        output
    }

    /// Export as a two-column key/value table
    pub fn export_csv<W: Write>(&self, writer: W, delimiter: u8) -> FinResult<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(writer);

        let rows = [
            ("period_start", self.start_date.to_string()),
            ("period_end", self.end_date.to_string()),
            ("total_income", self.total_income.to_string()),
            ("total_expense", self.total_expense.to_string()),
            ("balance", self.balance.to_string()),
            ("transaction_count", self.transaction_count().to_string()),
        ];

        csv_writer
            .write_record(["field", "value"])
            .map_err(|e| FinError::Export(e.to_string()))?;
        for (key, value) in &rows {
            csv_writer
                .write_record([*key, value.as_str()])
                .map_err(|e| FinError::Export(e.to_string()))?;
        }

        csv_writer
            .flush()
            .map_err(|e| FinError::Export(e.to_string()))?;
        Ok(())
    }
}

fn too_large(what: &str) -> FinError {
    FinError::Validation(format!("{} is too large to report", what))
}
