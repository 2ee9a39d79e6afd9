use std::{fmt, io};

use thiserror::Error;

use crate::config::ConfigError;

/// Field of an add command that was given more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Amount,
    Date,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputField::Amount => f.write_str("amount"),
            InputField::Date => f.write_str("date"),
        }
    }
}

/// A typed line that could not be turned into a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Too short: expected an amount, e.g. `spent 12.50 #food`.")]
    InsufficientInput,
    #[error("Unrecognized, ambiguous {field} `{token}`: expected exactly {expected}.")]
    AmbiguousInput {
        field: InputField,
        token: String,
        expected: usize,
    },
    #[error("Invalid date `{token}`: expected YYYY-MM-DD.")]
    InvalidDate { token: String },
    #[error("Unrecognized input `{input}`.")]
    UnrecognizedCommand {
        input: String,
        suggestion: Option<&'static str>,
    },
}

/// A persisted line that does not follow `<amount> on <YYYY-MM-DD>[ #<tag>]*`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {reason} (`{content}`)")]
pub struct MalformedRecord {
    pub line: usize,
    pub content: String,
    pub reason: String,
}

/// Failures raised by ledger mutations and persistence.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("No transaction at index {index}: the ledger holds {len}.")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Storage error: {0}")]
    Io(#[from] io::Error),
    #[error("`{operation}` is not supported.")]
    Unsupported { operation: &'static str },
}

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Error raised while handling one shell command; never fatal to the loop.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Start-up and terminal failures that end the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Could not load the ledger: {0}")]
    Ledger(#[from] LedgerError),
    #[error("Terminal error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
