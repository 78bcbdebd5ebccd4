//! Household expense tracker
//!
//! Family members log expenses into a shared CSV ledger; the tracker
//! summarizes spending, checks it against per-category monthly budgets and
//! keeps timestamped snapshots of the ledger.
//!
//! # Architecture
//!
//! - `config`: path resolution and user settings
//! - `error`: the crate-wide error type
//! - `models`: expenses, budget limits, money and months
//! - `storage`: the CSV ledger and budget table
//! - `reports`: aggregations and printable reports
//! - `backup`: ledger snapshots and restore
//! - `cli`: the interactive menu session
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::config::{TrackerPaths, Settings};
//! use expense_tracker::storage::{initialize_storage, Storage};
//! use expense_tracker::reports::ExpenseAnalysis;
//!
//! let paths = TrackerPaths::new()?;
//! initialize_storage(&paths)?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths);
//!
//! let entries = storage.ledger.load_all()?;
//! println!("{}", ExpenseAnalysis::generate(&entries)?.format_terminal(&settings));
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod storage;
pub mod utils;

pub use error::{TrackerError, TrackerResult};
