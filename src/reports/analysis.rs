//! Expense Analysis
//!
//! Household-wide totals per member and the average daily spend.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::aggregate::{average_daily_spend, total_by_member};
use crate::config::Settings;
use crate::display::{format_title, separator, truncate};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{ExpenseEntry, Money};

/// Analysis over the whole ledger
#[derive(Debug, Clone)]
pub struct ExpenseAnalysis {
    pub by_member: BTreeMap<String, Money>,
    pub average_daily: Money,
    pub total: Money,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub entry_count: usize,
}

impl ExpenseAnalysis {
    /// Analyze all entries; fails with `EmptyData` on an empty ledger
    pub fn generate(entries: &[ExpenseEntry]) -> TrackerResult<Self> {
        let average_daily = average_daily_spend(entries)?;
        let first_date = entries.iter().map(|e| e.date).min();
        let last_date = entries.iter().map(|e| e.date).max();
        let (Some(first_date), Some(last_date)) = (first_date, last_date) else {
            return Err(TrackerError::EmptyData("no expenses logged yet".into()));
        };

        Ok(Self {
            by_member: total_by_member(entries),
            average_daily,
            total: entries.iter().map(|e| e.amount).sum(),
            first_date,
            last_date,
            entry_count: entries.len(),
        })
    }

    /// Format the analysis for terminal display
    pub fn format_terminal(&self, settings: &Settings) -> String {
        let symbol = &settings.currency_symbol;
        let mut output = format_title("Expense Analysis");

        output.push_str(&format!(
            "Period: {} to {} ({} expense(s))\n\n",
            self.first_date, self.last_date, self.entry_count
        ));

        output.push_str("Total Expenses per Family Member:\n");
        output.push_str(&format!("{:<24} {:>14}\n", "Member", "Amount"));
        output.push_str(&separator(39));
        output.push('\n');
        for (member, amount) in &self.by_member {
            output.push_str(&format!(
                "{:<24} {:>14}\n",
                truncate(member, 24),
                amount.format_with_symbol(symbol)
            ));
        }
        output.push_str(&separator(39));
        output.push('\n');
        output.push_str(&format!(
            "{:<24} {:>14}\n\n",
            "Household Total",
            self.total.format_with_symbol(symbol)
        ));

        output.push_str(&format!(
            "Average Daily Household Expense: {}\n",
            self.average_daily.format_with_symbol(symbol)
        ));

        output
    }
}
