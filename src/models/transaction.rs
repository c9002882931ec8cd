//! Transaction model
//!
//! A transaction is either an expense (tagged with a category) or an income
//! (tagged with a source). Both share a description, a positive amount and a
//! timestamp.

use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;

/// Discriminator stored in the `type` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Expense,
    Income,
}

impl TransactionType {
    /// Storage tag (`expense` / `income`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "Expense"),
            Self::Income => write!(f, "Income"),
        }
    }
}

/// The variant-specific part of a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money spent, grouped by category
    Expense { category: String },
    /// Money received, grouped by source
    Income { source: String },
}

impl TransactionKind {
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Self::Expense { .. } => TransactionType::Expense,
            Self::Income { .. } => TransactionType::Income,
        }
    }

    /// Label and value of the discriminating field, e.g. `("Category", "food")`
    pub fn label(&self) -> (&'static str, &str) {
        match self {
            Self::Expense { category } => ("Category", category),
            Self::Income { source } => ("Source", source),
        }
    }
}

/// A validated financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Free-text description
    pub description: String,

    /// Amount, always positive
    pub amount: Money,

    /// When the transaction happened (local time)
    pub date: NaiveDateTime,

    /// Expense or income payload
    #[serde(flatten)]
    pub kind: TransactionKind,
}

impl Transaction {
    /// Create a validated expense
    ///
    /// `date` defaults to the current local time.
    pub fn expense(
        description: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
        date: Option<NaiveDateTime>,
    ) -> Result<Self, TransactionValidationError> {
        Self::build(
            description.into(),
            amount,
            TransactionKind::Expense {
                category: category.into(),
            },
            date,
        )
    }

    /// Create a validated income
    ///
    /// `date` defaults to the current local time.
    pub fn income(
        description: impl Into<String>,
        amount: Money,
        source: impl Into<String>,
        date: Option<NaiveDateTime>,
    ) -> Result<Self, TransactionValidationError> {
        Self::build(
            description.into(),
            amount,
            TransactionKind::Income {
                source: source.into(),
            },
            date,
        )
    }

    /// Text fields are trimmed and the date is kept to whole seconds, matching
    /// what the store can hold.
    fn build(
        description: String,
        amount: Money,
        kind: TransactionKind,
        date: Option<NaiveDateTime>,
    ) -> Result<Self, TransactionValidationError> {
        let kind = match kind {
            TransactionKind::Expense { category } => TransactionKind::Expense {
                category: category.trim().to_string(),
            },
            TransactionKind::Income { source } => TransactionKind::Income {
                source: source.trim().to_string(),
            },
        };
        let date = date.unwrap_or_else(|| Local::now().naive_local());

        let txn = Self {
            description: description.trim().to_string(),
            amount,
            date: date.trunc_subsecs(0),
            kind,
        };
        txn.validate()?;
        Ok(txn)
    }

    /// Check the field invariants
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.description.trim().is_empty() {
            return Err(TransactionValidationError::EmptyDescription);
        }

        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }

        match &self.kind {
            TransactionKind::Expense { category } if category.trim().is_empty() => {
                Err(TransactionValidationError::EmptyCategory)
            }
            TransactionKind::Income { source } if source.trim().is_empty() => {
                Err(TransactionValidationError::EmptySource)
            }
            _ => Ok(()),
        }
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.kind.transaction_type()
    }

    pub fn is_expense(&self) -> bool {
        matches!(self.kind, TransactionKind::Expense { .. })
    }

    pub fn is_income(&self) -> bool {
        matches!(self.kind, TransactionKind::Income { .. })
    }

    /// The category, for expenses
    pub fn category(&self) -> Option<&str> {
        match &self.kind {
            TransactionKind::Expense { category } => Some(category),
            TransactionKind::Income { .. } => None,
        }
    }

    /// The source, for incomes
    pub fn source(&self) -> Option<&str> {
        match &self.kind {
            TransactionKind::Income { source } => Some(source),
            TransactionKind::Expense { .. } => None,
        }
    }
}

/// Canonical form: `<Expense: lunch, 12.50, Category: food, Date: 2024-01-05>`
impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (label, value) = self.kind.label();
        write!(
            f,
            "<{}: {}, {}, {}: {}, Date: {}>",
            self.transaction_type(),
            self.description,
            self.amount,
            label,
            value,
            self.date.format("%Y-%m-%d")
        )
    }
}

/// A transaction as held by the store, together with its stable id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: TransactionId,
    #[serde(flatten)]
    pub transaction: Transaction,
}

impl Record {
    pub fn new(id: TransactionId, transaction: Transaction) -> Self {
        Self { id, transaction }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.transaction)
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    EmptyDescription,
    NonPositiveAmount(Money),
    EmptyCategory,
    EmptySource,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Description must be a non-empty string"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be a positive number, got {}", amount)
            }
            Self::EmptyCategory => write!(f, "Category must be a non-empty string"),
            Self::EmptySource => write!(f, "Source must be a non-empty string"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
