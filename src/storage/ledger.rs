//! Expense ledger repository
//!
//! Manages the append-only `expenses.csv` ledger. Rows are never rewritten or
//! reordered; the file order is the append order.

use std::path::PathBuf;

use chrono::NaiveDate;
use csv::StringRecord;
use tracing::{debug, info};

use crate::error::{TrackerError, TrackerResult};
use crate::models::expense::parse_stored_date;
use crate::models::{ExpenseDraft, ExpenseEntry, Money, DATE_FORMAT};

use super::file_io::{append_record, create_with_headers, read_records};

/// Ledger header row
pub const LEDGER_HEADERS: &[&str] = &["Name", "Date", "Description", "Amount", "Category"];

/// Repository for the expense ledger file
pub struct LedgerRepository {
    path: PathBuf,
}

impl LedgerRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Whether the ledger file has been created
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Create the ledger with only its header row if it is absent
    ///
    /// Returns `true` if a new file was created.
    pub fn initialize(&self) -> TrackerResult<bool> {
        let created = create_with_headers(&self.path, LEDGER_HEADERS)?;
        if created {
            info!(path = %self.path.display(), "created empty expense ledger");
        }
        Ok(created)
    }

    /// Validate operator input and append it as a new row
    ///
    /// Nothing is written if validation fails.
    pub fn append(&self, draft: &ExpenseDraft, today: NaiveDate) -> TrackerResult<ExpenseEntry> {
        let entry = draft.validate(today)?;
        self.append_entry(&entry)?;
        Ok(entry)
    }

    /// Append an already-built entry as a new row
    pub fn append_entry(&self, entry: &ExpenseEntry) -> TrackerResult<()> {
        if entry.amount.is_negative() {
            return Err(TrackerError::Validation(format!(
                "Amount cannot be negative: {}",
                entry.amount.to_plain_string()
            )));
        }
        if !self.exists() {
            return Err(TrackerError::ledger_not_found(self.path.display().to_string()));
        }

        let date = entry.date.format(DATE_FORMAT).to_string();
        let amount = entry.amount.to_plain_string();
        append_record(
            &self.path,
            &[
                entry.name.as_str(),
                date.as_str(),
                entry.description.as_str(),
                amount.as_str(),
                entry.category.as_str(),
            ],
        )?;

        info!(
            name = %entry.name,
            category = %entry.category,
            amount = %amount,
            "appended expense"
        );
        Ok(())
    }

    /// Load every entry in append order
    ///
    /// Fails with `NotFound` if the ledger was never initialized; an
    /// initialized ledger with no rows yields an empty vector.
    pub fn load_all(&self) -> TrackerResult<Vec<ExpenseEntry>> {
        if !self.exists() {
            return Err(TrackerError::ledger_not_found(self.path.display().to_string()));
        }

        let records = read_records(&self.path, LEDGER_HEADERS)?;
        let entries = records
            .iter()
            .map(|(line, record)| self.decode(*line, record))
            .collect::<TrackerResult<Vec<_>>>()?;

        debug!(count = entries.len(), "loaded expense ledger");
        Ok(entries)
    }

    fn decode(&self, line: usize, record: &StringRecord) -> TrackerResult<ExpenseEntry> {
        let corrupt = |reason: String| TrackerError::corrupt(self.source_name(), line, reason);

        let field = |idx: usize| record.get(idx).unwrap_or("").trim();

        let date = parse_stored_date(field(1))
            .ok_or_else(|| corrupt(format!("unparseable date '{}'", field(1))))?;
        let amount = Money::parse(field(3)).map_err(|e| corrupt(e.to_string()))?;

        ExpenseEntry::new(field(0), date, field(2), amount, field(4))
            .map_err(|e| corrupt(e.to_string()))
    }

    fn source_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}
