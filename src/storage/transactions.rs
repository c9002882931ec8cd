//! Transaction repository backed by a delimited file
//!
//! Rows are kept in insertion order. Every mutation loads the whole file,
//! changes it in memory and rewrites it atomically. The id counter lives in a
//! small JSON state file so ids are never reused after a delete.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{FinError, FinResult};
use crate::models::{
    DateRange, Money, Record, Transaction, TransactionId, TransactionKind, TransactionType,
};

use super::file_io::{read_json, read_records, write_json_atomic, write_records_atomic};

/// Timestamp format used in the `date` column
pub const STORED_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One flattened row of the transactions file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredRow {
    id: u64,
    #[serde(rename = "type")]
    kind: TransactionType,
    description: String,
    amount: String,
    category: Option<String>,
    source: Option<String>,
    date: String,
}

impl From<&Record> for StoredRow {
    fn from(record: &Record) -> Self {
        let txn = &record.transaction;
        Self {
            id: record.id.value(),
            kind: txn.transaction_type(),
            description: txn.description.clone(),
            amount: txn.amount.to_string(),
            category: txn.category().map(str::to_string),
            source: txn.source().map(str::to_string),
            date: txn.date.format(STORED_DATE_FORMAT).to_string(),
        }
    }
}

impl TryFrom<StoredRow> for Record {
    type Error = FinError;

    fn try_from(row: StoredRow) -> Result<Self, Self::Error> {
        let invalid = |what: String| FinError::Storage(format!("Row {}: {}", row.id, what));

        let amount = Money::parse(&row.amount).map_err(|e| invalid(e.to_string()))?;
        let date = parse_stored_date(&row.date)
            .ok_or_else(|| invalid(format!("invalid date '{}'", row.date)))?;

        let kind = match row.kind {
            TransactionType::Expense => TransactionKind::Expense {
                category: row.category.clone().unwrap_or_default(),
            },
            TransactionType::Income => TransactionKind::Income {
                source: row.source.clone().unwrap_or_default(),
            },
        };

        let transaction = Transaction {
            description: row.description.clone(),
            amount,
            date,
            kind,
        };
        transaction
            .validate()
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Record::new(TransactionId::new(row.id), transaction))
    }
}

/// Accept full timestamps as written by this tool, or bare dates
fn parse_stored_date(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, STORED_DATE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(crate::models::period::start_of_day)
        })
}

/// Persisted id counter
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreState {
    next_id: u64,
}

impl Default for StoreState {
    fn default() -> Self {
        Self { next_id: 1 }
    }
}

/// Keep the records whose date falls inside `range`, in their original order
pub fn filter_records(records: &[Record], range: &DateRange) -> Vec<Record> {
    records
        .iter()
        .filter(|r| range.contains(r.transaction.date))
        .cloned()
        .collect()
}

/// Repository for transaction persistence
pub struct TransactionRepository {
    path: PathBuf,
    state_path: PathBuf,
    delimiter: u8,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf, state_path: PathBuf, delimiter: u8) -> Self {
        Self {
            path,
            state_path,
            delimiter,
        }
    }

    /// Load every record in stored order
    ///
    /// A missing file is an empty store; an unreadable or malformed one is an error.
    pub fn load(&self) -> FinResult<Vec<Record>> {
        let rows: Vec<StoredRow> = read_records(&self.path, self.delimiter)?;
        let records = rows
            .into_iter()
            .map(Record::try_from)
            .collect::<FinResult<Vec<_>>>()?;
        debug!("Loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    /// Load every record, degrading to an empty list if the file can't be read
    pub fn load_or_empty(&self) -> Vec<Record> {
        match self.load() {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    "Could not read transactions from {}: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Records whose date falls inside `range`
    pub fn filter(&self, range: &DateRange) -> Vec<Record> {
        filter_records(&self.load_or_empty(), range)
    }

    /// Append a transaction at the end of the store and assign it the next id
    ///
    /// Fails without touching the file if the current contents can't be read.
    pub fn append(&self, transaction: Transaction) -> FinResult<Record> {
        let mut records = self.load()?;
        let id = self.next_id(&records)?;

        let next_id = id.next().ok_or_else(id_space_exhausted)?;

        let record = Record::new(id, transaction);
        records.push(record.clone());

        self.save(&records)?;
        write_json_atomic(
            &self.state_path,
            &StoreState {
                next_id: next_id.value(),
            },
        )?;

        debug!("Appended record {} to {}", id, self.path.display());
        Ok(record)
    }

    /// Remove the record with the given id
    pub fn delete(&self, id: TransactionId) -> FinResult<Record> {
        let mut records = self.load()?;
        let position = records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| FinError::transaction_not_found(id.to_string()))?;

        let removed = records.remove(position);
        self.save(&records)?;
        debug!("Deleted record {} from {}", id, self.path.display());
        Ok(removed)
    }

    /// Remove the record at a zero-based position in stored order
    pub fn delete_at(&self, index: usize) -> FinResult<Record> {
        let mut records = self.load()?;
        if index >= records.len() {
            return Err(FinError::transaction_not_found(format!(
                "position {}",
                index
            )));
        }

        let removed = records.remove(index);
        self.save(&records)?;
        debug!(
            "Deleted record at position {} ({}) from {}",
            index,
            removed.id,
            self.path.display()
        );
        Ok(removed)
    }

    /// Count records (lenient)
    pub fn count(&self) -> usize {
        self.load_or_empty().len()
    }

    fn save(&self, records: &[Record]) -> FinResult<()> {
        let rows: Vec<StoredRow> = records.iter().map(StoredRow::from).collect();
        write_records_atomic(&self.path, &rows, self.delimiter)
    }

    fn next_id(&self, records: &[Record]) -> FinResult<TransactionId> {
        let state: StoreState = read_json(&self.state_path)?;
        let after_max = match records.iter().map(|r| r.id).max() {
            Some(max) => max.next().ok_or_else(id_space_exhausted)?.value(),
            None => 1,
        };
        Ok(TransactionId::new(state.next_id.max(after_max)))
    }
}

fn id_space_exhausted() -> FinError {
    FinError::Storage("No transaction ids left to assign".into())
}
