//! Error types for the changepack CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for changepack operations.
///
/// Every variant is terminal: the process reports it and exits with
/// [`exit_codes::FAILURE`].
#[derive(Error, Debug)]
pub enum ChangepackError {
    /// The git executable is missing from PATH or refuses to report a version.
    #[error("It appears that git can't be found in PATH.")]
    ToolUnavailable,

    /// The working directory does not contain a `.git` entry.
    #[error("No git repository could be found in the current working directory.")]
    RepositoryAbsent,

    /// One or more revision flags are missing or malformed.
    ///
    /// All problems found in a single run are carried together.
    #[error("{}", .0.join("\n"))]
    Validation(Vec<String>),

    /// The checked-out revision is not the one named by `--last`.
    #[error("HEAD is at {current}; please check out {required} before packaging.")]
    StateMismatch { required: String, current: String },

    /// A git invocation failed.
    #[error("Git operation failed: {0}")]
    Git(String),

    /// Creating or writing the archive failed.
    #[error("Archive failed: {0}")]
    Archive(String),

    /// The configuration file could not be read or is invalid.
    #[error("{0}")]
    Config(String),

    /// Writing list or progress output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl ChangepackError {
    /// Returns the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        exit_codes::FAILURE
    }

    /// One human-readable line per reported problem.
    pub fn messages(&self) -> Vec<String> {
        match self {
            ChangepackError::Validation(problems) => problems.clone(),
            other => vec![other.to_string()],
        }
    }
}

/// Result type alias for changepack operations.
pub type Result<T> = std::result::Result<T, ChangepackError>;
