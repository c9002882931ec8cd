//! Display formatting for terminal output
//!
//! Provides utilities for formatting records for terminal display.

pub mod transaction;

pub use transaction::{format_record_details, format_record_list};
