//! Expense entry model
//!
//! An [`ExpenseEntry`] is one row of the ledger. Operator input arrives as an
//! [`ExpenseDraft`] of raw strings and only becomes an entry once validated.

use chrono::{NaiveDate, NaiveDateTime};

use super::money::Money;
use crate::error::{TrackerError, TrackerResult};

/// Fixed date format for entry dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Timestamp format written by older versions of the ledger
const LEGACY_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single logged expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseEntry {
    /// Household member who spent the money
    pub name: String,
    pub date: NaiveDate,
    pub description: String,
    /// Always non-negative
    pub amount: Money,
    pub category: String,
}

impl ExpenseEntry {
    /// Create an entry, rejecting negative amounts and blank name/category
    pub fn new(
        name: impl Into<String>,
        date: NaiveDate,
        description: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
    ) -> TrackerResult<Self> {
        let name = name.into().trim().to_string();
        let category = category.into().trim().to_string();

        if name.is_empty() {
            return Err(TrackerError::Validation("Name cannot be empty".into()));
        }
        if category.is_empty() {
            return Err(TrackerError::Validation("Category cannot be empty".into()));
        }
        if amount.is_negative() {
            return Err(TrackerError::Validation(format!(
                "Amount cannot be negative: {}",
                amount.to_plain_string()
            )));
        }

        Ok(Self {
            name,
            date,
            description: description.into().trim().to_string(),
            amount,
            category,
        })
    }
}

/// Raw, unvalidated input for a new expense
#[derive(Debug, Clone, Default)]
pub struct ExpenseDraft {
    pub name: String,
    /// `YYYY-MM-DD`, or blank for today
    pub date: String,
    pub description: String,
    pub amount: String,
    pub category: String,
}

impl ExpenseDraft {
    /// Validate the draft into an entry
    ///
    /// `today` fills in a blank date.
    pub fn validate(&self, today: NaiveDate) -> TrackerResult<ExpenseEntry> {
        let date = if self.date.trim().is_empty() {
            today
        } else {
            parse_input_date(&self.date)?
        };

        let amount =
            Money::parse(&self.amount).map_err(|e| TrackerError::Validation(e.to_string()))?;

        ExpenseEntry::new(
            &self.name,
            date,
            &self.description,
            amount,
            &self.category,
        )
    }
}

/// Parse an operator-supplied date in the fixed format
pub fn parse_input_date(s: &str) -> TrackerResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| {
        TrackerError::Validation(format!(
            "Invalid date '{}'. Expected YYYY-MM-DD.",
            s.trim()
        ))
    })
}

/// Parse a date read back from the ledger
///
/// Accepts the fixed format and the legacy full timestamp, keeping only the date.
pub fn parse_stored_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, LEGACY_DATETIME_FORMAT)
                .ok()
                .map(|dt| dt.date())
        })
}
