//! Budget limit model
//!
//! One spending limit per category. Editing a limit replaces it; there is no
//! history of previous values.

use super::money::Money;
use crate::error::{TrackerError, TrackerResult};

/// A monthly spending limit for a category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetLimit {
    /// Unique key within the budget table
    pub category: String,
    pub limit: Money,
}

impl BudgetLimit {
    /// Create a limit, rejecting blank categories and negative amounts
    pub fn new(category: impl Into<String>, limit: Money) -> TrackerResult<Self> {
        let category = category.into().trim().to_string();
        if category.is_empty() {
            return Err(TrackerError::Validation("Category cannot be empty".into()));
        }
        if limit.is_negative() {
            return Err(TrackerError::Validation(format!(
                "Budget cannot be negative: {}",
                limit.to_plain_string()
            )));
        }
        Ok(Self { category, limit })
    }

    /// Parse a limit from operator input
    pub fn parse(category: &str, limit: &str) -> TrackerResult<Self> {
        let limit = Money::parse(limit).map_err(|e| TrackerError::Validation(e.to_string()))?;
        Self::new(category, limit)
    }
}
