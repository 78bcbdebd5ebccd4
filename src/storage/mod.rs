//! Storage layer for the expense tracker
//!
//! CSV file storage for the expense ledger and the budget table.

pub mod budgets;
pub mod file_io;
pub mod init;
pub mod ledger;

pub use budgets::{BudgetRepository, BUDGET_HEADERS};
pub use init::initialize_storage;
pub use ledger::{LedgerRepository, LEDGER_HEADERS};

use crate::config::paths::TrackerPaths;

/// Main storage coordinator that provides access to both repositories
pub struct Storage {
    paths: TrackerPaths,
    pub ledger: LedgerRepository,
    pub budgets: BudgetRepository,
}

impl Storage {
    /// Create a new Storage instance
    ///
    /// Does not touch the filesystem; see [`initialize_storage`].
    pub fn new(paths: TrackerPaths) -> Self {
        Self {
            ledger: LedgerRepository::new(paths.ledger_file()),
            budgets: BudgetRepository::new(paths.budget_file()),
            paths,
        }
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &TrackerPaths {
        &self.paths
    }

    /// Check if both files have been created
    pub fn is_initialized(&self) -> bool {
        self.ledger.exists() && self.budgets.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths.clone());

        assert!(!storage.is_initialized());

        initialize_storage(&paths).unwrap();
        assert!(storage.is_initialized());
        assert_eq!(storage.ledger.path(), &paths.ledger_file());
    }
}
