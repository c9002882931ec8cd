//! Audit logging system for fintrack
//!
//! Records every create and delete with a snapshot of the affected
//! transaction in an append-only audit log.
//!
//! # Architecture
//!
//! - `AuditEntry`: a single audit log entry with timestamp, operation,
//!   transaction id, a one-line summary and the record snapshot.
//! - `AuditLogger`: appends entries to the audit log file using a
//!   line-delimited JSON format (JSONL) and reads them back.

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
