//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod period;
pub mod report;
pub mod transaction;

pub use period::PeriodArgs;
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{
    handle_add_command, handle_delete_command, handle_view_command, AddArgs, DeleteArgs,
};
