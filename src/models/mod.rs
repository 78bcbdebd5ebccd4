//! Core data models for the expense tracker

pub mod budget;
pub mod expense;
pub mod money;
pub mod month;

pub use budget::BudgetLimit;
pub use expense::{ExpenseDraft, ExpenseEntry, DATE_FORMAT};
pub use money::Money;
pub use month::Month;
