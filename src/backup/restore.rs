//! Ledger restoration
//!
//! Restoring replaces the live ledger with a snapshot's bytes. No merge is
//! attempted and no safety snapshot of the current ledger is taken first;
//! callers that want one must call [`BackupManager::backup`] themselves.

use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::config::paths::TrackerPaths;
use crate::error::{TrackerError, TrackerResult};
use crate::storage::LedgerRepository;

use super::manager::{BackupManager, BackupSnapshot};

/// Handles restoring the ledger from snapshots
pub struct RestoreManager {
    backups: BackupManager,
    ledger_path: PathBuf,
}

impl RestoreManager {
    pub fn new(paths: &TrackerPaths) -> Self {
        Self {
            backups: BackupManager::new(paths),
            ledger_path: paths.ledger_file(),
        }
    }

    /// Restore the snapshot with the given filename
    ///
    /// Fails with `SelectionOutOfRange` if no listed snapshot has that name.
    pub fn restore(&self, identifier: &str) -> TrackerResult<RestoreResult> {
        let snapshot = self.backups.find(identifier)?;
        self.restore_snapshot(&snapshot)
    }

    /// Overwrite the live ledger with a snapshot
    ///
    /// The snapshot is fully decoded first; a snapshot that is not a valid
    /// ledger is rejected and the live ledger is left as it was.
    pub fn restore_snapshot(&self, snapshot: &BackupSnapshot) -> TrackerResult<RestoreResult> {
        let entries = LedgerRepository::new(snapshot.path.clone()).load_all()?;

        if let Some(parent) = self.ledger_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&snapshot.path, &self.ledger_path)
            .map_err(|e| TrackerError::Io(format!("Failed to restore ledger: {}", e)))?;

        info!(
            snapshot = %snapshot.filename,
            entries = entries.len(),
            "restored ledger from backup"
        );

        Ok(RestoreResult {
            snapshot: snapshot.clone(),
            entries_restored: entries.len(),
        })
    }
}

/// Result of a restore operation
#[derive(Debug, Clone)]
pub struct RestoreResult {
    /// The snapshot that is now the live ledger
    pub snapshot: BackupSnapshot,
    /// Number of entries in the restored ledger
    pub entries_restored: usize,
}

impl RestoreResult {
    /// Get a summary of what was restored
    pub fn summary(&self) -> String {
        format!(
            "Restored {} expense(s) from {} (taken {})",
            self.entries_restored,
            self.snapshot.filename,
            self.snapshot.created_at.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseEntry, Money};
    use crate::storage::{initialize_storage, Storage};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_env() -> (Storage, BackupManager, RestoreManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();

        let storage = Storage::new(paths.clone());
        let backup_manager = BackupManager::new(&paths);
        let restore_manager = RestoreManager::new(&paths);

        (storage, backup_manager, restore_manager, temp_dir)
    }

    fn entry(name: &str, day: u32, cents: i64) -> ExpenseEntry {
        ExpenseEntry::new(
            name,
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            "",
            Money::from_cents(cents),
            "food",
        )
        .unwrap()
    }

    #[test]
    fn test_restore_round_trip() {
        let (storage, backups, restore, _temp) = create_test_env();

        let original = vec![entry("Alice", 1, 100), entry("Bob", 2, 200), entry("Carol", 3, 300)];
        for e in &original {
            storage.ledger.append_entry(e).unwrap();
        }
        let snapshot = backups.backup().unwrap();

        storage.ledger.append_entry(&entry("Dave", 4, 400)).unwrap();
        assert_eq!(storage.ledger.load_all().unwrap().len(), 4);

        let result = restore.restore(&snapshot.filename).unwrap();

        assert_eq!(result.entries_restored, 3);
        assert_eq!(storage.ledger.load_all().unwrap(), original);
        assert!(result.summary().contains("Restored 3 expense(s)"));
    }

    #[test]
    fn test_unknown_snapshot_changes_nothing() {
        let (storage, backups, restore, _temp) = create_test_env();
        storage.ledger.append_entry(&entry("Alice", 1, 100)).unwrap();
        backups.backup().unwrap();

        let err = restore.restore("expenses_backup_20000101000000.csv").unwrap_err();

        assert!(matches!(
            err,
            TrackerError::SelectionOutOfRange { available: 1, .. }
        ));
        assert_eq!(storage.ledger.load_all().unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_snapshot_is_rejected() {
        let (storage, backups, restore, _temp) = create_test_env();
        storage.ledger.append_entry(&entry("Alice", 1, 100)).unwrap();
        let snapshot = backups.backup().unwrap();
        fs::write(&snapshot.path, "this is not a ledger\n").unwrap();

        let err = restore.restore_snapshot(&snapshot).unwrap_err();

        assert!(matches!(err, TrackerError::DataCorruption { .. }));
        assert_eq!(storage.ledger.load_all().unwrap().len(), 1);
    }

    #[test]
    fn test_restore_recreates_missing_ledger() {
        let (storage, backups, restore, _temp) = create_test_env();
        storage.ledger.append_entry(&entry("Alice", 1, 100)).unwrap();
        let snapshot = backups.backup().unwrap();

        fs::remove_file(storage.ledger.path()).unwrap();
        restore.restore_snapshot(&snapshot).unwrap();

        assert_eq!(storage.ledger.load_all().unwrap().len(), 1);
    }
}
