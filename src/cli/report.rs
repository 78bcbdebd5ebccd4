//! Report and budget commands

use std::io::{BufRead, Write};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{BudgetLimit, Month};
use crate::reports::{BudgetEvaluation, ExpenseAnalysis, MonthlyReport, TrendReport};

use super::session::Session;

/// Per-member totals and average daily spend
pub fn handle_analyze<R: BufRead, W: Write>(session: &mut Session<R, W>) -> TrackerResult<()> {
    let entries = session.storage().ledger.load_all()?;
    let report = ExpenseAnalysis::generate(&entries)?;
    let text = report.format_terminal(session.settings());
    session.say(text)
}

/// Cumulative spend over time
pub fn handle_trends<R: BufRead, W: Write>(session: &mut Session<R, W>) -> TrackerResult<()> {
    let entries = session.storage().ledger.load_all()?;
    let report = TrendReport::generate(&entries)?;
    let text = report.format_terminal(session.settings());
    session.say(text)
}

/// Report for a chosen month, or the latest one when left blank
pub fn handle_monthly_report<R: BufRead, W: Write>(
    session: &mut Session<R, W>,
) -> TrackerResult<()> {
    let answer = session.ask("Enter month (YYYY-MM, blank for latest): ")?;
    let month = if answer.trim().is_empty() {
        None
    } else {
        Some(answer.parse::<Month>().map_err(TrackerError::Validation)?)
    };

    let entries = session.storage().ledger.load_all()?;
    let report = match month {
        Some(month) => MonthlyReport::generate(&entries, month),
        None => MonthlyReport::for_latest_month(&entries)?,
    };
    let text = report.format_terminal(session.settings());
    session.say(text)
}

/// Set a category limit, or show the budget evaluation when no category is given
pub fn handle_manage_budget<R: BufRead, W: Write>(
    session: &mut Session<R, W>,
) -> TrackerResult<()> {
    let category = session.ask("Enter category to budget (blank to view budget report): ")?;

    if category.trim().is_empty() {
        let evaluation = BudgetEvaluation::for_latest_month(session.storage())?;
        let text = evaluation.format_terminal(session.settings());
        return session.say(text);
    }

    let amount = session.ask("Enter monthly budget amount: ")?;
    let limit = BudgetLimit::parse(&category, &amount)?;

    let symbol = session.settings().currency_symbol.clone();
    let message = format!(
        "Budget for {} set to {}",
        limit.category,
        limit.limit.format_with_symbol(&symbol)
    );
    session.storage().budgets.set_limit(limit)?;
    session.say(message)
}
