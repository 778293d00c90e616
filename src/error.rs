//! Error types for the assistant bot.
//!
//! Field validation errors live in [`crate::domain::ValidationError`]; this
//! module defines the errors of the layers built on top of them.

use crate::domain::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while executing a single command.
///
/// None of these end the session: the command boundary reports them as
/// `Error: <message>` and the loop carries on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// A field failed validation
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Wrong number of arguments
    #[error("Usage: {0}")]
    Usage(&'static str),
}

/// Errors that can occur while loading or saving the address book.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing the data file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The data file is not valid JSON or holds invalid fields
    #[error("Malformed address book data: {0}")]
    Json(#[from] serde_json::Error),

    /// The data file was written by an incompatible version
    #[error("Unsupported address book format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with CommandError
pub type CommandResult<T> = Result<T, CommandError>;

/// Convenience type alias for Results with StorageError
pub type StorageResult<T> = Result<T, StorageError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
