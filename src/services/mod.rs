//! Service layer for fintrack
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, id assignment and audit logging.

pub mod transaction;

pub use transaction::{CreateTransactionInput, TransactionService};
