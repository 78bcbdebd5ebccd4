//! Budget Evaluation
//!
//! Joins the budget table against one month of spending. The budget table
//! drives the join: every configured category appears (with zero spend if it
//! had none), and spending in unbudgeted categories is left out.

use tracing::warn;

use super::aggregate::{latest_month, spend_by_category};
use crate::config::Settings;
use crate::display::{format_title, separator, truncate};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{BudgetLimit, ExpenseEntry, Money, Month};
use crate::storage::Storage;

/// One row of the evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetStatus {
    pub category: String,
    pub budget: Money,
    pub spent: Money,
    /// `budget - spent`; negative when over budget
    pub remaining: Money,
}

impl BudgetStatus {
    pub fn is_exceeded(&self) -> bool {
        self.remaining.is_negative()
    }
}

/// Compare each budget limit with spending in `month`
///
/// Rows come back in budget-table order.
pub fn evaluate(
    entries: &[ExpenseEntry],
    budgets: &[BudgetLimit],
    month: Month,
) -> Vec<BudgetStatus> {
    let spending = spend_by_category(entries, month);

    budgets
        .iter()
        .map(|limit| {
            let spent = spending.get(&limit.category).copied().unwrap_or_default();
            BudgetStatus {
                category: limit.category.clone(),
                budget: limit.limit,
                spent,
                remaining: limit.limit - spent,
            }
        })
        .collect()
}

/// Budget evaluation for a month
#[derive(Debug, Clone)]
pub struct BudgetEvaluation {
    pub month: Month,
    pub rows: Vec<BudgetStatus>,
}

impl BudgetEvaluation {
    /// Evaluate loaded data for a given month
    pub fn generate(entries: &[ExpenseEntry], budgets: &[BudgetLimit], month: Month) -> Self {
        Self {
            month,
            rows: evaluate(entries, budgets, month),
        }
    }

    /// Load both tables and evaluate the latest month in the ledger
    ///
    /// A missing budget table or ledger is reported as `ConfigMissing`.
    pub fn for_latest_month(storage: &Storage) -> TrackerResult<Self> {
        let budgets = storage.budgets.load().map_err(missing_as_config)?;
        let entries = storage.ledger.load_all().map_err(missing_as_config)?;

        let month = latest_month(&entries)?;
        let evaluation = Self::generate(&entries, &budgets, month);

        for row in evaluation.exceeded() {
            let over_by = (row.spent - row.budget).to_plain_string();
            warn!(
                month = %evaluation.month,
                category = %row.category,
                over_by = %over_by,
                "budget exceeded"
            );
        }

        Ok(evaluation)
    }

    /// Rows whose spending went over budget
    pub fn exceeded(&self) -> Vec<&BudgetStatus> {
        self.rows.iter().filter(|r| r.is_exceeded()).collect()
    }

    /// Format the evaluation for terminal display
    pub fn format_terminal(&self, settings: &Settings) -> String {
        let symbol = &settings.currency_symbol;
        let mut output = format_title(&format!("Budget Report for {}", self.month));

        if self.rows.is_empty() {
            output.push_str("No budget set. Use Manage Budget to add category limits.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<20} {:>12} {:>12} {:>12}\n",
            "Category", "Budget", "Spent", "Remaining"
        ));
        output.push_str(&separator(59));
        output.push('\n');
        for row in &self.rows {
            output.push_str(&format!(
                "{:<20} {:>12} {:>12} {:>12}\n",
                truncate(&row.category, 20),
                row.budget.format_with_symbol(symbol),
                row.spent.format_with_symbol(symbol),
                row.remaining.format_with_symbol(symbol)
            ));
        }

        let exceeded = self.exceeded();
        if !exceeded.is_empty() {
            output.push_str("\nWARNING: Budget Exceeded\n");
            for row in exceeded {
                output.push_str(&format!(
                    "  {} is over budget by {}\n",
                    row.category,
                    (row.spent - row.budget).format_with_symbol(symbol)
                ));
            }
        }

        output
    }
}

fn missing_as_config(err: TrackerError) -> TrackerError {
    match err {
        TrackerError::NotFound {
            entity_type,
            identifier,
        } => TrackerError::ConfigMissing(format!("{} not found: {}", entity_type, identifier)),
        other => other,
    }
}
