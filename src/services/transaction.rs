//! Transaction service
//!
//! Provides the add / list / delete operations used by the CLI.

use chrono::NaiveDateTime;
use log::info;

use crate::error::{FinError, FinResult};
use crate::models::{DateRange, Money, Record, Transaction, TransactionId, TransactionType};
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub transaction_type: TransactionType,
    pub description: String,
    pub amount: Money,
    /// Defaults to now when unset
    pub date: Option<NaiveDateTime>,
    /// Required for expenses
    pub category: Option<String>,
    /// Required for incomes
    pub source: Option<String>,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate and store a new transaction
    pub fn create(&self, input: CreateTransactionInput) -> FinResult<Record> {
        let transaction = match input.transaction_type {
            TransactionType::Expense => {
                if input.source.is_some() {
                    return Err(FinError::Validation(
                        "A source can only be given for income".into(),
                    ));
                }
                Transaction::expense(
                    input.description,
                    input.amount,
                    input.category.unwrap_or_default(),
                    input.date,
                )
            }
            TransactionType::Income => {
                if input.category.is_some() {
                    return Err(FinError::Validation(
                        "A category can only be given for expenses".into(),
                    ));
                }
                Transaction::income(
                    input.description,
                    input.amount,
                    input.source.unwrap_or_default(),
                    input.date,
                )
            }
        }
        .map_err(|e| FinError::Validation(e.to_string()))?;

        let record = self.storage.transactions.append(transaction)?;
        info!("Added transaction {}", record);

        self.storage.log_create(&record);

        Ok(record)
    }

    /// Records inside `range`, in stored order
    ///
    /// An unreadable store yields an empty list (with a logged warning).
    pub fn list(&self, range: &DateRange) -> Vec<Record> {
        self.storage.transactions.filter(range)
    }

    /// Delete a transaction by its id
    pub fn delete(&self, id: TransactionId) -> FinResult<Record> {
        let removed = self.storage.transactions.delete(id)?;
        info!("Deleted transaction {}", removed);
        self.storage.log_delete(&removed);
        Ok(removed)
    }

    /// Delete the transaction at a zero-based position in stored order
    pub fn delete_at(&self, index: usize) -> FinResult<Record> {
        let removed = self.storage.transactions.delete_at(index)?;
        info!("Deleted transaction {} at position {}", removed, index);
        self.storage.log_delete(&removed);
        Ok(removed)
    }
}
