//! Budget table repository
//!
//! Manages `budget.csv`, a small `Category,Budget` lookup table. Setting a
//! limit replaces any existing row for that category.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{BudgetLimit, Money};

use super::file_io::{create_with_headers, read_records, write_csv_atomic};

/// Budget table header row
pub const BUDGET_HEADERS: &[&str] = &["Category", "Budget"];

/// Repository for the budget table file
pub struct BudgetRepository {
    path: PathBuf,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Create the table with only its header row if it is absent
    pub fn initialize(&self) -> TrackerResult<bool> {
        let created = create_with_headers(&self.path, BUDGET_HEADERS)?;
        if created {
            info!(path = %self.path.display(), "created empty budget table");
        }
        Ok(created)
    }

    /// Load all limits in file order
    pub fn load(&self) -> TrackerResult<Vec<BudgetLimit>> {
        if !self.exists() {
            return Err(TrackerError::budget_table_not_found(
                self.path.display().to_string(),
            ));
        }

        let source_name = self
            .path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let mut limits: Vec<BudgetLimit> = Vec::new();
        for (line, record) in read_records(&self.path, BUDGET_HEADERS)? {
            let category = record.get(0).unwrap_or("");
            let amount = record.get(1).unwrap_or("");
            let limit = Money::parse(amount)
                .map_err(|e| TrackerError::corrupt(&source_name, line, e.to_string()))
                .and_then(|limit| {
                    BudgetLimit::new(category, limit)
                        .map_err(|e| TrackerError::corrupt(&source_name, line, e.to_string()))
                })?;

            // A hand-edited table may repeat a category; the last row wins
            match limits.iter_mut().find(|l| l.category == limit.category) {
                Some(existing) => existing.limit = limit.limit,
                None => limits.push(limit),
            }
        }

        debug!(count = limits.len(), "loaded budget table");
        Ok(limits)
    }

    /// Set the limit for a category, replacing any existing value
    pub fn set_limit(&self, limit: BudgetLimit) -> TrackerResult<()> {
        let mut limits = self.load()?;

        match limits.iter_mut().find(|l| l.category == limit.category) {
            Some(existing) => existing.limit = limit.limit,
            None => limits.push(limit.clone()),
        }

        let rows: Vec<Vec<String>> = limits
            .iter()
            .map(|l| vec![l.category.clone(), l.limit.to_plain_string()])
            .collect();
        write_csv_atomic(&self.path, BUDGET_HEADERS, &rows)?;

        info!(
            category = %limit.category,
            limit = %limit.limit.to_plain_string(),
            "set budget limit"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_table() -> (TempDir, BudgetRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = BudgetRepository::new(temp_dir.path().join("budget.csv"));
        repo.initialize().unwrap();
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_table() {
        let (_temp, repo) = create_test_table();
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_missing_table_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let repo = BudgetRepository::new(temp_dir.path().join("budget.csv"));
        assert!(repo.load().unwrap_err().is_not_found());
    }

    #[test]
    fn test_set_limit_overwrites() {
        let (_temp, repo) = create_test_table();

        repo.set_limit(BudgetLimit::parse("food", "25").unwrap()).unwrap();
        repo.set_limit(BudgetLimit::parse("fuel", "40").unwrap()).unwrap();
        repo.set_limit(BudgetLimit::parse("food", "30.50").unwrap()).unwrap();

        let limits = repo.load().unwrap();
        assert_eq!(limits.len(), 2);
        assert_eq!(limits[0].category, "food");
        assert_eq!(limits[0].limit, Money::from_cents(3050));
        assert_eq!(limits[1].category, "fuel");
        assert_eq!(
            fs::read_to_string(repo.path()).unwrap(),
            "Category,Budget\nfood,30.50\nfuel,40.00\n"
        );
    }

    #[test]
    fn test_reads_hand_written_table() {
        let (_temp, repo) = create_test_table();
        fs::write(repo.path(), "Category,Budget\ngroceries,300\nutilities,120.0\n").unwrap();

        let limits = repo.load().unwrap();
        assert_eq!(limits[0].limit, Money::from_cents(30000));
        assert_eq!(limits[1].limit, Money::from_cents(12000));
    }

    #[test]
    fn test_bad_budget_is_corruption() {
        let (_temp, repo) = create_test_table();
        fs::write(repo.path(), "Category,Budget\ngroceries,plenty\n").unwrap();

        let err = repo.load().unwrap_err();
        assert!(matches!(err, TrackerError::DataCorruption { row: 2, .. }));
    }
}
