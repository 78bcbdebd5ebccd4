//! Monthly Report
//!
//! Spending for one calendar month broken down by member and by category,
//! followed by a month-over-month comparison of the whole ledger.

use std::collections::BTreeMap;

use super::aggregate::{
    entries_in_month, latest_month, monthly_totals, spend_by_category, total_by_member,
};
use crate::config::Settings;
use crate::display::{format_bar, format_title, separator, truncate};
use crate::error::TrackerResult;
use crate::models::{ExpenseEntry, Money, Month};

/// Report for a single month
#[derive(Debug, Clone)]
pub struct MonthlyReport {
    pub month: Month,
    pub by_member: BTreeMap<String, Money>,
    pub by_category: BTreeMap<String, Money>,
    pub total: Money,
    /// Totals for every month in the ledger, oldest first
    pub comparison: BTreeMap<Month, Money>,
}

impl MonthlyReport {
    /// Generate the report for the month of the latest entry
    ///
    /// Fails with `EmptyData` on an empty ledger.
    pub fn for_latest_month(entries: &[ExpenseEntry]) -> TrackerResult<Self> {
        let month = latest_month(entries)?;
        Ok(Self::generate(entries, month))
    }

    /// Generate the report for a given month
    ///
    /// A month with no entries yields empty groupings.
    pub fn generate(entries: &[ExpenseEntry], month: Month) -> Self {
        let in_month: Vec<ExpenseEntry> = entries_in_month(entries, month)
            .into_iter()
            .cloned()
            .collect();

        Self {
            month,
            by_member: total_by_member(&in_month),
            by_category: spend_by_category(entries, month),
            total: in_month.iter().map(|e| e.amount).sum(),
            comparison: monthly_totals(entries),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.by_member.is_empty()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, settings: &Settings) -> String {
        let symbol = &settings.currency_symbol;
        let mut output = format_title(&format!("Monthly Report for {}", self.month));

        if self.is_empty() {
            output.push_str(&format!("\nNo expenses recorded for {}.\n", self.month));
        } else {
            output.push_str("\nTotal Expenses per Family Member:\n");
            push_table(&mut output, &self.by_member, symbol);

            output.push_str("\nExpenses by Category:\n");
            push_table(&mut output, &self.by_category, symbol);

            output.push_str(&format!(
                "\nTotal for {}: {}\n",
                self.month,
                self.total.format_with_symbol(symbol)
            ));
        }

        if self.comparison.is_empty() {
            return output;
        }
        output.push_str("\nMonthly Expense Comparison:\n");
        let max = self
            .comparison
            .values()
            .map(|m| m.cents())
            .max()
            .unwrap_or(0) as f64;
        for (month, amount) in &self.comparison {
            let marker = if *month == self.month { "*" } else { " " };
            output.push_str(&format!(
                "{}{} {:>14}  {}\n",
                marker,
                month,
                amount.format_with_symbol(symbol),
                format_bar(amount.cents() as f64, max, settings.chart_width)
            ));
        }

        output
    }
}

fn push_table(output: &mut String, rows: &BTreeMap<String, Money>, symbol: &str) {
    output.push_str(&separator(39));
    output.push('\n');
    for (label, amount) in rows {
        output.push_str(&format!(
            "{:<24} {:>14}\n",
            truncate(label, 24),
            amount.format_with_symbol(symbol)
        ));
    }
}
