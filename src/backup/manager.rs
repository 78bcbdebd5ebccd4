//! Backup manager for the expense ledger
//!
//! Snapshots are verbatim copies of `expenses.csv` named
//! `expenses_backup_<YYYYMMDDHHMMSS>.csv` (local time). A second snapshot in
//! the same second gets a `_N` suffix instead of overwriting the first.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{debug, info};

use crate::config::paths::TrackerPaths;
use crate::error::{TrackerError, TrackerResult};

const BACKUP_PREFIX: &str = "expenses_backup_";
const BACKUP_SUFFIX: &str = ".csv";

/// Metadata about a ledger snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupSnapshot {
    /// Snapshot filename, used as its identifier
    pub filename: String,
    /// Full path to the snapshot
    pub path: PathBuf,
    /// When the snapshot was taken (from the filename)
    pub created_at: NaiveDateTime,
    /// Disambiguates snapshots taken within the same second
    pub sequence: u32,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Creates and lists ledger snapshots
pub struct BackupManager {
    /// Path to backup directory
    backup_dir: PathBuf,
    /// The live ledger
    ledger_path: PathBuf,
}

impl BackupManager {
    pub fn new(paths: &TrackerPaths) -> Self {
        Self {
            backup_dir: paths.backup_dir(),
            ledger_path: paths.ledger_file(),
        }
    }

    /// Copy the current ledger into a new snapshot
    ///
    /// Fails with `SourceMissing` if there is no ledger to copy.
    pub fn backup(&self) -> TrackerResult<BackupSnapshot> {
        if !self.ledger_path.exists() {
            return Err(TrackerError::SourceMissing(format!(
                "{} not found. Nothing to backup.",
                self.ledger_path.display()
            )));
        }

        fs::create_dir_all(&self.backup_dir).map_err(|e| {
            TrackerError::Io(format!("Failed to create backup directory: {}", e))
        })?;

        let stamp = Local::now().format("%Y%m%d%H%M%S").to_string();
        let mut sequence = 0;
        let backup_path = loop {
            let candidate = self.backup_dir.join(snapshot_filename(&stamp, sequence));
            if !candidate.exists() {
                break candidate;
            }
            sequence += 1;
        };

        fs::copy(&self.ledger_path, &backup_path)
            .map_err(|e| TrackerError::Io(format!("Failed to write backup file: {}", e)))?;

        let snapshot = self.parse_snapshot(&backup_path).ok_or_else(|| {
            TrackerError::Io(format!(
                "Backup written to unexpected path: {}",
                backup_path.display()
            ))
        })?;

        info!(snapshot = %snapshot.filename, bytes = snapshot.size_bytes, "created ledger backup");
        Ok(snapshot)
    }

    /// List all snapshots, oldest first
    ///
    /// An absent or empty backup directory yields an empty list.
    pub fn list_backups(&self) -> TrackerResult<Vec<BackupSnapshot>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir).map_err(|e| {
            TrackerError::Io(format!("Failed to read backup directory: {}", e))
        })? {
            let entry = entry.map_err(|e| {
                TrackerError::Io(format!("Failed to read directory entry: {}", e))
            })?;

            if let Some(snapshot) = self.parse_snapshot(&entry.path()) {
                backups.push(snapshot);
            }
        }

        backups.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then(a.sequence.cmp(&b.sequence))
        });

        debug!(count = backups.len(), "listed ledger backups");
        Ok(backups)
    }

    /// Pick a snapshot by its 1-based position in [`list_backups`](Self::list_backups)
    pub fn select(&self, position: usize) -> TrackerResult<BackupSnapshot> {
        let backups = self.list_backups()?;
        let available = backups.len();

        position
            .checked_sub(1)
            .and_then(|idx| backups.into_iter().nth(idx))
            .ok_or_else(|| TrackerError::SelectionOutOfRange {
                selection: position.to_string(),
                available,
            })
    }

    /// Find a listed snapshot by filename
    pub fn find(&self, identifier: &str) -> TrackerResult<BackupSnapshot> {
        let backups = self.list_backups()?;
        let available = backups.len();

        backups
            .into_iter()
            .find(|b| b.filename == identifier)
            .ok_or_else(|| TrackerError::SelectionOutOfRange {
                selection: identifier.to_string(),
                available,
            })
    }

    pub fn backup_dir(&self) -> &PathBuf {
        &self.backup_dir
    }

    fn parse_snapshot(&self, path: &Path) -> Option<BackupSnapshot> {
        if !path.is_file() {
            return None;
        }
        let filename = path.file_name()?.to_string_lossy().to_string();
        let (created_at, sequence) = parse_snapshot_name(&filename)?;
        let size_bytes = fs::metadata(path).ok()?.len();

        Some(BackupSnapshot {
            filename,
            path: path.to_path_buf(),
            created_at,
            sequence,
            size_bytes,
        })
    }
}

fn snapshot_filename(stamp: &str, sequence: u32) -> String {
    if sequence == 0 {
        format!("{}{}{}", BACKUP_PREFIX, stamp, BACKUP_SUFFIX)
    } else {
        format!("{}{}_{}{}", BACKUP_PREFIX, stamp, sequence, BACKUP_SUFFIX)
    }
}

/// Parse `expenses_backup_YYYYMMDDHHMMSS[_N].csv`
fn parse_snapshot_name(filename: &str) -> Option<(NaiveDateTime, u32)> {
    let stem = filename
        .strip_prefix(BACKUP_PREFIX)?
        .strip_suffix(BACKUP_SUFFIX)?;

    let (stamp, sequence) = match stem.split_once('_') {
        Some((stamp, seq)) => (stamp, seq.parse().ok()?),
        None => (stem, 0),
    };

    Some((parse_backup_timestamp(stamp)?, sequence))
}

/// Parse a backup timestamp from the filename date part
fn parse_backup_timestamp(stamp: &str) -> Option<NaiveDateTime> {
    if stamp.len() != 14 || !stamp.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let year: i32 = stamp[0..4].parse().ok()?;
    let month: u32 = stamp[4..6].parse().ok()?;
    let day: u32 = stamp[6..8].parse().ok()?;
    let hour: u32 = stamp[8..10].parse().ok()?;
    let minute: u32 = stamp[10..12].parse().ok()?;
    let second: u32 = stamp[12..14].parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::from_hms_opt(hour, minute, second)?;

    Some(NaiveDateTime::new(date, time))
}
