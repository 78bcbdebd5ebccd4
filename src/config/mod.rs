//! Configuration module for the expense tracker
//!
//! - Path resolution for the ledger, budget table and backups
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::TrackerPaths;
pub use settings::Settings;
