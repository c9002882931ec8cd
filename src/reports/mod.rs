//! Reports module for fintrack
//!
//! Provides grouped totals (expenses by category, income by source) and the
//! overall income / expense / balance summary.

pub mod grouped;
pub mod summary;

pub use grouped::{GroupBy, GroupTotal, GroupedReport};
pub use summary::SummaryReport;
