//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Record;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Transaction was added
    Create,
    /// Transaction was deleted
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Id of the affected transaction
    pub transaction_id: u64,

    /// Canonical one-line rendering of the transaction
    pub summary: String,

    /// JSON snapshot of the record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<serde_json::Value>,
}

impl AuditEntry {
    fn new(operation: Operation, record: &Record) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            transaction_id: record.id.value(),
            summary: record.transaction.to_string(),
            record: serde_json::to_value(record).ok(),
        }
    }

    /// Entry for a newly added transaction
    pub fn create(record: &Record) -> Self {
        Self::new(Operation::Create, record)
    }

    /// Entry for a deleted transaction
    pub fn delete(record: &Record) -> Self {
        Self::new(Operation::Delete, record)
    }

    /// Format for display
    pub fn format_human_readable(&self) -> String {
        format!(
            "{} {} #{} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.transaction_id,
            self.summary
        )
    }
}
