//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{ApplyArgs, Cli, Commands};
use crate::error::Result;
use crate::ui::UserInterface;

/// A runnable subcommand.
///
/// Errors are returned rather than printed; `main` reports them and maps
/// them to an exit code with [`GraftError::exit_code`](crate::GraftError::exit_code).
pub trait Command {
    /// Run the command, talking to the user through `ui`.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    work_dir: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given working directory.
    pub fn new(work_dir: PathBuf) -> Self {
        Self { work_dir }
    }

    /// Get the working directory.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Apply(args)) => {
                let cmd =
                    super::apply::ApplyCommand::new(&self.work_dir, cli.catalog.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::List(args)) => {
                let cmd =
                    super::list::ListCommand::new(&self.work_dir, cli.catalog.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                // Default to apply with prompts
                let cmd = super::apply::ApplyCommand::new(
                    &self.work_dir,
                    cli.catalog.clone(),
                    ApplyArgs::default(),
                );
                cmd.execute(ui)
            }
        }
    }
}
