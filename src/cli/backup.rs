//! Backup and restore commands

use std::io::{BufRead, Write};

use crate::backup::{BackupManager, RestoreManager};
use crate::error::{TrackerError, TrackerResult};

use super::session::Session;

/// Snapshot the ledger into the backup directory
pub fn handle_backup<R: BufRead, W: Write>(session: &mut Session<R, W>) -> TrackerResult<()> {
    let manager = BackupManager::new(session.storage().paths());
    let snapshot = manager.backup()?;

    session.say(format!("Backup successful: {}", snapshot.filename))?;
    session.say(format!("Location: {}", snapshot.path.display()))
}

/// List snapshots, let the operator pick one, and overwrite the ledger with it
pub fn handle_restore<R: BufRead, W: Write>(session: &mut Session<R, W>) -> TrackerResult<()> {
    let paths = session.storage().paths().clone();
    let manager = BackupManager::new(&paths);
    let backups = manager.list_backups()?;

    if backups.is_empty() {
        return session.say("No backups found. Create one with Backup Data.");
    }

    session.say("Available Backups")?;
    session.say("=================")?;
    for (i, backup) in backups.iter().enumerate() {
        session.say(format!(
            "  {}. {} ({}, {})",
            i + 1,
            backup.filename,
            backup.created_at.format("%Y-%m-%d %H:%M:%S"),
            format_size(backup.size_bytes)
        ))?;
    }
    session.say("Restoring replaces the current ledger.")?;

    let answer = session.ask("Select a backup to restore (number): ")?;
    let position: usize = answer
        .trim()
        .parse()
        .map_err(|_| TrackerError::SelectionOutOfRange {
            selection: answer.trim().to_string(),
            available: backups.len(),
        })?;

    let snapshot = manager.select(position)?;
    let result = RestoreManager::new(&paths).restore_snapshot(&snapshot)?;
    session.say(result.summary())
}

/// Format a byte count for display
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::session::tests::{create_test_session, output_of};
    use crate::reports::aggregate::tests::household;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_backup_then_restore() {
        let (mut session, _temp) = create_test_session("6\n7\n1\n8\n");
        for entry in household() {
            session.storage().ledger.append_entry(&entry).unwrap();
        }

        // Backup, then restore after the ledger has grown
        session.step().unwrap();
        let extra = household().remove(0);
        session.storage().ledger.append_entry(&extra).unwrap();
        assert_eq!(session.storage().ledger.load_all().unwrap().len(), 4);

        session.run().unwrap();

        assert_eq!(session.storage().ledger.load_all().unwrap(), household());
        let output = output_of(session);
        assert!(output.contains("Backup successful"));
        assert!(output.contains("Restored 3 expense(s)"));
    }

    #[test]
    fn test_restore_without_backups() {
        let (mut session, _temp) = create_test_session("7\n8\n");
        session.run().unwrap();
        assert!(output_of(session).contains("No backups found"));
    }

    #[test]
    fn test_restore_bad_selection_keeps_ledger() {
        let (mut session, _temp) = create_test_session("6\n7\nfive\n7\n3\n8\n");
        session.storage().ledger.append_entry(&household()[0]).unwrap();
        session.run().unwrap();

        assert_eq!(session.storage().ledger.load_all().unwrap().len(), 1);
        let output = output_of(session);
        assert!(output.contains("Selection 'five' is out of range"));
        assert!(output.contains("Selection '3' is out of range"));
    }

    #[test]
    fn test_backup_without_ledger() {
        let (mut session, _temp) = create_test_session("6\n8\n");
        std::fs::remove_file(session.storage().ledger.path()).unwrap();
        session.run().unwrap();
        assert!(output_of(session).contains("Error: Backup source missing"));
    }
}
