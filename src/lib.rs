//! fintrack - command-line tracker for personal income and expenses
//!
//! This library provides the core functionality of the fintrack CLI: the
//! transaction model, the delimited-file store, period filtering and the
//! category / source / summary reports.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, money, ids, periods)
//! - `storage`: Delimited file storage layer
//! - `audit`: Audit logging system
//! - `services`: Business logic layer
//! - `reports`: Grouped and summary reports
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack::config::{paths::FinPaths, settings::Settings};
//! use fintrack::storage::Storage;
//!
//! let paths = FinPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths, &settings)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::FinError;
