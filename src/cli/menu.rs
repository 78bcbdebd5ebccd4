//! Main menu commands

use std::fmt;

/// An operation selectable from the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    LogExpense,
    Analyze,
    ViewTrends,
    MonthlyReport,
    ManageBudget,
    Backup,
    Restore,
    Exit,
}

impl MenuCommand {
    /// All commands in menu order
    pub const ALL: [MenuCommand; 8] = [
        MenuCommand::LogExpense,
        MenuCommand::Analyze,
        MenuCommand::ViewTrends,
        MenuCommand::MonthlyReport,
        MenuCommand::ManageBudget,
        MenuCommand::Backup,
        MenuCommand::Restore,
        MenuCommand::Exit,
    ];

    /// 1-based menu number
    pub fn number(self) -> usize {
        Self::ALL
            .iter()
            .position(|c| *c == self)
            .map_or(0, |idx| idx + 1)
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuCommand::LogExpense => "Log an Expense",
            MenuCommand::Analyze => "Analyze Expenses",
            MenuCommand::ViewTrends => "View Expense Trends",
            MenuCommand::MonthlyReport => "Generate Monthly Report",
            MenuCommand::ManageBudget => "Manage Budget",
            MenuCommand::Backup => "Backup Data",
            MenuCommand::Restore => "Restore Data",
            MenuCommand::Exit => "Exit",
        }
    }

    /// Parse the operator's numeric selection
    pub fn from_selection(input: &str) -> Option<Self> {
        let number: usize = input.trim().parse().ok()?;
        number
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx))
            .copied()
    }
}

impl fmt::Display for MenuCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Render the main menu
pub fn render_menu() -> String {
    let mut output = String::from("\nHousehold Expense Tracker\n");
    for command in MenuCommand::ALL {
        output.push_str(&format!("{}. {}\n", command.number(), command.label()));
    }
    output
}
