//! Command errors.

use thiserror::Error;

/// Errors produced by command handlers and registration functions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Arguments after the command name were not understood.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The handler observed cancellation and stopped.
    #[error("Command cancelled")]
    Cancelled,

    /// Handler failed while running.
    #[error("Handler failed: {0}")]
    Handler(String),

    /// Publishing the command list to a channel failed.
    #[error("Registration failed: {0}")]
    Registration(String),
}

/// Result type alias for command operations.
pub type CommandResult<T = ()> = Result<T, CommandError>;
