//! Interactive session controller
//!
//! Drives the main menu loop. Every command runs to completion (or fails)
//! before the menu is shown again; all errors stop here and are printed
//! instead of ending the session.

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::config::settings::Settings;
use crate::error::{TrackerError, TrackerResult};
use crate::storage::Storage;

use super::backup::{handle_backup, handle_restore};
use super::console::Console;
use super::expense::handle_log_expense;
use super::menu::{render_menu, MenuCommand};
use super::report::{handle_analyze, handle_manage_budget, handle_monthly_report, handle_trends};

/// Where the session is in its loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for a menu selection
    MainMenu,
    /// A command is waiting on an operator prompt
    AwaitingInput,
    /// A command is running
    Executing,
    /// Terminal state
    Exit,
}

/// An interactive session over one console
pub struct Session<R, W> {
    storage: Storage,
    settings: Settings,
    console: Console<R, W>,
    state: SessionState,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(storage: Storage, settings: Settings, input: R, output: W) -> Self {
        Self {
            storage,
            settings,
            console: Console::new(input, output),
            state: SessionState::MainMenu,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run until the operator exits or input ends
    ///
    /// Only a console I/O failure is returned; bad input never ends the loop.
    pub fn run(&mut self) -> TrackerResult<()> {
        while self.state != SessionState::Exit {
            self.step()?;
        }
        debug!("session ended");
        Ok(())
    }

    /// Show the menu once and handle one selection
    pub fn step(&mut self) -> TrackerResult<()> {
        if self.state == SessionState::Exit {
            return Ok(());
        }

        self.console.say(render_menu())?;
        let choice = match self.console.prompt("Enter your choice: ") {
            Ok(choice) => choice,
            Err(TrackerError::InputClosed) => {
                self.state = SessionState::Exit;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let Some(command) = MenuCommand::from_selection(&choice) else {
            debug!(choice = %choice, "invalid menu choice");
            return self.console.say("Invalid choice. Please try again.");
        };

        if command == MenuCommand::Exit {
            self.console.say("Goodbye!")?;
            self.state = SessionState::Exit;
            return Ok(());
        }

        self.state = SessionState::Executing;
        let result = self.execute(command);
        self.state = SessionState::MainMenu;

        match result {
            Ok(()) => Ok(()),
            Err(TrackerError::InputClosed) => {
                self.state = SessionState::Exit;
                Ok(())
            }
            Err(e) => {
                warn!(command = ?command, error = %e, "command failed");
                self.console.say(format!("Error: {}", e))
            }
        }
    }

    fn execute(&mut self, command: MenuCommand) -> TrackerResult<()> {
        debug!(command = ?command, "executing command");
        match command {
            MenuCommand::LogExpense => handle_log_expense(self),
            MenuCommand::Analyze => handle_analyze(self),
            MenuCommand::ViewTrends => handle_trends(self),
            MenuCommand::MonthlyReport => handle_monthly_report(self),
            MenuCommand::ManageBudget => handle_manage_budget(self),
            MenuCommand::Backup => handle_backup(self),
            MenuCommand::Restore => handle_restore(self),
            MenuCommand::Exit => Ok(()),
        }
    }

    /// Prompt the operator on behalf of the running command
    pub(crate) fn ask(&mut self, label: &str) -> TrackerResult<String> {
        self.state = SessionState::AwaitingInput;
        let answer = self.console.prompt(label);
        self.state = SessionState::Executing;
        answer
    }

    pub(crate) fn say(&mut self, message: impl std::fmt::Display) -> TrackerResult<()> {
        self.console.say(message)
    }

    /// Consume the session, returning the output writer
    pub fn into_output(self) -> W {
        self.console.into_output()
    }
}
