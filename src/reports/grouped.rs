//! Grouped totals report
//!
//! Sums expenses per category or income per source over a date range.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;

use crate::error::{FinError, FinResult};
use crate::models::{DateRange, Money, Record};

/// Which field the report groups on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    /// Expense records, grouped by category
    Category,
    /// Income records, grouped by source
    Source,
}

impl GroupBy {
    /// Column name used in exports
    pub fn column(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Source => "source",
        }
    }

    fn key<'r>(&self, record: &'r Record) -> Option<&'r str> {
        match self {
            Self::Category => record.transaction.category(),
            Self::Source => record.transaction.source(),
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category => write!(f, "Expenses by Category"),
            Self::Source => write!(f, "Income by Source"),
        }
    }
}

/// Total for one category or source
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTotal {
    pub name: String,
    pub total: Money,
    pub transaction_count: usize,
    /// Share of the report total, 0-100
    pub percentage: f64,
}

/// Grouped totals over a date range
#[derive(Debug, Clone)]
pub struct GroupedReport {
    pub group_by: GroupBy,
    pub range: DateRange,
    /// Sorted by total, largest first
    pub groups: Vec<GroupTotal>,
    pub total: Money,
    pub total_transactions: usize,
}

impl GroupedReport {
    /// Expenses by category; `None` when there is no matching expense
    pub fn by_category(records: &[Record], range: DateRange) -> FinResult<Option<Self>> {
        Self::generate(GroupBy::Category, records, range)
    }

    /// Income by source; `None` when there is no matching income
    pub fn by_source(records: &[Record], range: DateRange) -> FinResult<Option<Self>> {
        Self::generate(GroupBy::Source, records, range)
    }

    /// Aggregate the records inside `range` that carry the grouping field
    ///
    /// Totals that don't fit in [`Money`] are a validation error.
    pub fn generate(
        group_by: GroupBy,
        records: &[Record],
        range: DateRange,
    ) -> FinResult<Option<Self>> {
        let mut totals: BTreeMap<&str, (Money, usize)> = BTreeMap::new();

        for record in records
            .iter()
            .filter(|r| range.contains(r.transaction.date))
        {
            if let Some(key) = group_by.key(record) {
                let entry = totals.entry(key).or_insert((Money::zero(), 0));
                entry.0 = entry
                    .0
                    .checked_add(record.transaction.amount)
                    .ok_or_else(|| total_overflow(key))?;
                entry.1 += 1;
            }
        }

        if totals.is_empty() {
            return Ok(None);
        }

        let total = totals
            .values()
            .try_fold(Money::zero(), |acc, (amount, _)| acc.checked_add(*amount))
            .ok_or_else(|| total_overflow("all groups"))?;
        let total_transactions = totals.values().map(|(_, count)| count).sum();

        let mut groups: Vec<GroupTotal> = totals
            .into_iter()
            .map(|(name, (amount, count))| GroupTotal {
                name: name.to_string(),
                total: amount,
                transaction_count: count,
                percentage: if total.is_zero() {
                    0.0
                } else {
                    amount.as_f64() / total.as_f64() * 100.0
                },
            })
            .collect();

        // BTreeMap order already sorts names; a stable sort keeps it for ties
        groups.sort_by(|a, b| b.total.cmp(&a.total));

        Ok(Some(Self {
            group_by,
            range,
            groups,
            total,
            total_transactions,
        }))
    }

    /// The `n` largest groups
    pub fn top(&self, n: usize) -> &[GroupTotal] {
        &self.groups[..n.min(self.groups.len())]
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}: {}\n", self.group_by, self.range));
        output.push_str(&"=".repeat(64));
        output.push('\n');

        output.push_str(&format!(
            "{:<32} {:>14} {:>7} {:>7}\n",
            capitalize(self.group_by.column()),
            "Amount",
            "Count",
            "%"
        ));
        output.push_str(&"-".repeat(64));
        output.push('\n');

        for group in &self.groups {
            output.push_str(&format!(
                "{:<32} {:>14} {:>7} {:>6.1}%\n",
                group.name,
                group.total.format_with_symbol(currency),
                group.transaction_count,
                group.percentage
            ));
        }

        output.push_str(&"-".repeat(64));
        output.push('\n');
        output.push_str(&format!(
            "{:<32} {:>14} {:>7}\n",
            "TOTAL",
            self.total.format_with_symbol(currency),
            self.total_transactions
        ));

        output
    }

    /// Export as delimited text: a header row, then one row per group
    pub fn export_csv<W: Write>(&self, writer: W, delimiter: u8) -> FinResult<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(writer);

        csv_writer
            .write_record([self.group_by.column(), "total_amount"])
            .map_err(|e| FinError::Export(e.to_string()))?;

        for group in &self.groups {
            csv_writer
                .write_record([group.name.as_str(), group.total.to_string().as_str()])
                .map_err(|e| FinError::Export(e.to_string()))?;
        }

        csv_writer
            .flush()
            .map_err(|e| FinError::Export(e.to_string()))?;
        Ok(())
    }
}

fn total_overflow(group: &str) -> FinError {
    FinError::Validation(format!("Total for {} is too large to report", group))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Transaction, TransactionId};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn sample_records() -> Vec<Record> {
        let txns = vec![
            Transaction::expense("groceries", Money::from_cents(10000), "food", Some(at(2024, 1, 5))),
            Transaction::income("january pay", Money::from_cents(50000), "salary", Some(at(2024, 1, 10))),
            Transaction::expense("dinner", Money::from_cents(5000), "food", Some(at(2024, 2, 1))),
            Transaction::expense("bus", Money::from_cents(7000), "transport", Some(at(2024, 2, 3))),
            Transaction::income("side gig", Money::from_cents(2500), "freelance", Some(at(2024, 2, 4))),
        ];
        txns.into_iter()
            .enumerate()
            .map(|(i, t)| Record::new(TransactionId::new(i as u64 + 1), t.unwrap()))
            .collect()
    }

    fn january() -> DateRange {
        DateRange::days(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
    }

    #[test]
    fn test_by_category_january_only() {
        let report = GroupedReport::by_category(&sample_records(), january()).unwrap().unwrap();
        assert_eq!(report.groups.len(), 1);
        assert_eq!(report.groups[0].name, "food");
        assert_eq!(report.groups[0].total, Money::from_cents(10000));
        assert_eq!(report.groups[0].percentage, 100.0);
    }

    #[test]
    fn test_by_category_sorted_descending_and_sums_match() {
        let records = sample_records();
        let report = GroupedReport::by_category(&records, DateRange::all()).unwrap().unwrap();

        let names: Vec<_> = report.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["food", "transport"]);
        assert_eq!(report.groups[0].total, Money::from_cents(15000));
        assert_eq!(report.groups[0].transaction_count, 2);

        let expense_sum = records
            .iter()
            .filter(|r| r.transaction.is_expense())
            .try_fold(Money::zero(), |acc, r| acc.checked_add(r.transaction.amount))
            .unwrap();
        let group_sum = report
            .groups
            .iter()
            .try_fold(Money::zero(), |acc, g| acc.checked_add(g.total))
            .unwrap();
        assert_eq!(group_sum, expense_sum);
        assert_eq!(report.total, expense_sum);
        assert_eq!(report.total_transactions, 3);
    }

    #[test]
    fn test_by_source() {
        let report = GroupedReport::by_source(&sample_records(), DateRange::all()).unwrap().unwrap();
        let names: Vec<_> = report.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["salary", "freelance"]);
        assert_eq!(report.total, Money::from_cents(52500));
    }

    #[test]
    fn test_ties_are_ordered_by_name() {
        let records: Vec<Record> = ["b", "a", "c"]
            .iter()
            .enumerate()
            .map(|(i, cat)| {
                let txn =
                    Transaction::expense("x", Money::from_cents(100), *cat, Some(at(2024, 1, 1)))
                        .unwrap();
                Record::new(TransactionId::new(i as u64 + 1), txn)
            })
            .collect();

        let report = GroupedReport::by_category(&records, DateRange::all()).unwrap().unwrap();
        let names: Vec<_> = report.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_no_data_is_none() {
        assert!(GroupedReport::by_category(&[], DateRange::all()).unwrap().is_none());

        let march = DateRange::since(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert!(GroupedReport::by_source(&sample_records(), march)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_overflowing_total_is_validation_error() {
        let records: Vec<Record> = (1..=2)
            .map(|i| {
                let txn = Transaction::income(
                    "windfall",
                    Money::from_cents(i64::MAX - 1),
                    "lottery",
                    Some(at(2024, 1, 1)),
                )
                .unwrap();
                Record::new(TransactionId::new(i), txn)
            })
            .collect();

        let err = GroupedReport::by_source(&records, DateRange::all()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_top() {
        let report = GroupedReport::by_category(&sample_records(), DateRange::all()).unwrap().unwrap();
        assert_eq!(report.top(1).len(), 1);
        assert_eq!(report.top(10).len(), 2);
    }

    #[test]
    fn test_export_csv() {
        let report = GroupedReport::by_category(&sample_records(), DateRange::all()).unwrap().unwrap();
        let mut output = Vec::new();
        report.export_csv(&mut output, b';').unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text, "category;total_amount\nfood;150.00\ntransport;70.00\n");
    }

    #[test]
    fn test_format_terminal() {
        let report = GroupedReport::by_source(&sample_records(), DateRange::all()).unwrap().unwrap();
        let text = report.format_terminal("$");
        assert!(text.starts_with("Income by Source: all time"));
        assert!(text.contains("salary"));
        assert!(text.contains("$525.00"));
    }
}
