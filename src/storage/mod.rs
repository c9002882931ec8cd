//! Storage layer for fintrack
//!
//! Provides the delimited transactions file, the id state file and the audit
//! log, all with atomic writes and automatic directory creation.

pub mod file_io;
pub mod transactions;

pub use file_io::{read_json, read_records, write_json_atomic, write_records_atomic};
pub use transactions::{filter_records, TransactionRepository};

use log::warn;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::FinPaths;
use crate::config::settings::Settings;
use crate::error::FinError;
use crate::models::Record;

/// Main storage coordinator
pub struct Storage {
    pub transactions: TransactionRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: FinPaths, settings: &Settings) -> Result<Self, FinError> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(
                paths.transactions_file(),
                paths.state_file(),
                settings.delimiter_byte()?,
            ),
            audit: AuditLogger::new(paths.audit_log()),
        })
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Record a create in the audit log
    ///
    /// The data change has already happened; a failed audit write is logged
    /// and does not undo it.
    pub fn log_create(&self, record: &Record) {
        if let Err(e) = self.audit.log(&AuditEntry::create(record)) {
            warn!("Failed to write audit entry for {}: {}", record.id, e);
        }
    }

    /// Record a delete in the audit log
    pub fn log_delete(&self, record: &Record) {
        if let Err(e) = self.audit.log(&AuditEntry::delete(record)) {
            warn!("Failed to write audit entry for {}: {}", record.id, e);
        }
    }
}
