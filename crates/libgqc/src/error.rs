use std::{io, path::PathBuf, result::Result as StdResult};

use thiserror::Error;

/// Custom Result type for gqc operations.
pub type Result<T> = StdResult<T, GqcError>;

/// gqc-specific error types
#[derive(Error, Debug)]
pub enum GqcError {
    /// The checkout request is structurally invalid (e.g. an empty ref name).
    #[error("Invalid checkout target: {0}")]
    InvalidTarget(String),

    /// Some repositories failed to check out; the rest settled normally.
    #[error("Checkout failed in {failed} of {total} repositories")]
    CheckoutFailed {
        /// Number of repositories whose checkout failed.
        failed: usize,
        /// Number of repositories in the batch.
        total: usize,
    },

    /// The operation was cancelled by the user.
    #[error("Aborted by user")]
    UserAborted,

    /// A contextual precondition failed (e.g. no repositories in the workspace).
    #[error("Context error: {0}")]
    ContextError(String),

    /// The configuration file could not be read or parsed.
    #[error("Config error in {path}: {message}")]
    ConfigError {
        /// Path of the offending configuration file.
        path: PathBuf,
        /// Human-readable error description.
        message: String,
    },

    /// A generic operation failed (e.g. writing to the terminal).
    #[error("Operation failed: {0}")]
    OperationError(String),

    /// A git command failed.
    #[error("Git error: {0}")]
    GitError(String),

    /// An underlying I/O operation failed.
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl GqcError {
    /// Return the recommended process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UserAborted => 130,
            Self::CheckoutFailed { .. } => 2,
            Self::InvalidTarget(_) => 3,
            Self::GitError(_) => 4,
            _ => 1,
        }
    }
}
