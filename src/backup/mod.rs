//! Backup system for the expense ledger
//!
//! - `BackupManager`: creates and lists ledger snapshots
//! - `RestoreManager`: validates a snapshot and copies it over the live ledger
//!
//! Snapshots are never modified or deleted by the tracker. Restoring is a
//! destructive overwrite of the live ledger.
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::backup::{BackupManager, RestoreManager};
//! use expense_tracker::config::TrackerPaths;
//!
//! let paths = TrackerPaths::new()?;
//! let snapshot = BackupManager::new(&paths).backup()?;
//!
//! // Later, restore from it
//! let result = RestoreManager::new(&paths).restore(&snapshot.filename)?;
//! println!("{}", result.summary());
//! ```

mod manager;
mod restore;

pub use manager::{BackupManager, BackupSnapshot};
pub use restore::{RestoreManager, RestoreResult};
