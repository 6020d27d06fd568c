//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations; running `graft` with no subcommand
//! runs `apply`.

pub mod apply;
pub mod completions;
pub mod dispatcher;
pub mod list;
pub mod source;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
