//! Reports module for the expense tracker
//!
//! Pure aggregations live in [`aggregate`]; the other modules wrap them into
//! report structs that know how to print themselves.

pub mod aggregate;
pub mod analysis;
pub mod budget_check;
pub mod monthly;
pub mod trends;

pub use aggregate::DailyTotal;
pub use analysis::ExpenseAnalysis;
pub use budget_check::{evaluate, BudgetEvaluation, BudgetStatus};
pub use monthly::MonthlyReport;
pub use trends::TrendReport;
