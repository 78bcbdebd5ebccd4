//! Storage initialization
//!
//! Handles first-run setup: header-only ledger and budget table.

use crate::config::paths::TrackerPaths;
use crate::error::TrackerError;

use super::budgets::BudgetRepository;
use super::ledger::LedgerRepository;

/// Initialize storage for a fresh installation
///
/// Existing files are left untouched.
pub fn initialize_storage(paths: &TrackerPaths) -> Result<(), TrackerError> {
    paths.ensure_directories()?;

    LedgerRepository::new(paths.ledger_file()).initialize()?;
    BudgetRepository::new(paths.budget_file()).initialize()?;

    Ok(())
}
