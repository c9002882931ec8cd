//! Core data models for fintrack
//!
//! This module contains the data structures that represent the tracking
//! domain: transactions, money amounts, ids and query periods.

pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use ids::TransactionId;
pub use money::{Money, MoneyParseError};
pub use period::{DateRange, NamedPeriod, PeriodSelector};
pub use transaction::{
    Record, Transaction, TransactionKind, TransactionType, TransactionValidationError,
};
