//! Expense entry command

use std::io::{BufRead, Write};

use chrono::Local;

use crate::error::TrackerResult;
use crate::models::ExpenseDraft;

use super::session::Session;

/// Prompt for the fields of a new expense and append it to the ledger
///
/// Nothing is written unless every field validates.
pub fn handle_log_expense<R: BufRead, W: Write>(session: &mut Session<R, W>) -> TrackerResult<()> {
    let draft = ExpenseDraft {
        name: session.ask("Enter your name: ")?,
        date: session.ask("Enter date (YYYY-MM-DD, blank for today): ")?,
        description: session.ask("Enter description: ")?,
        amount: session.ask("Enter amount: ")?,
        category: session.ask("Enter category (e.g., groceries, utilities): ")?,
    };

    let today = Local::now().date_naive();
    let entry = session.storage().ledger.append(&draft, today)?;

    let symbol = session.settings().currency_symbol.clone();
    session.say(format!(
        "Expense logged successfully: {} spent {} on {} ({})",
        entry.name,
        entry.amount.format_with_symbol(&symbol),
        entry.category,
        entry.date
    ))
}
