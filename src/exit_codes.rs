//! Exit code constants for the changepack CLI.
//!
//! Every failure class (missing tool, missing repository, bad flags, head
//! mismatch, git or archive errors) terminates with the same code.

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Any failure.
pub const FAILURE: i32 = 1;
