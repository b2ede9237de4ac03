//! Input and repository-state checks for the pack command.

use crate::error::{ChangepackError, Result};
use std::path::Path;

/// Longest accepted revision identifier (a full SHA-1 hash).
pub const MAX_REVISION_LEN: usize = 40;

/// Check both revision flags, reporting every problem at once.
///
/// `last` is `None` when the flag was omitted; it then defaults to HEAD and
/// is not validated here.
pub fn validate_revisions(first: &str, last: Option<&str>) -> Result<()> {
    let mut problems = Vec::new();

    if first.is_empty() {
        problems.push("Please provide a git commit to begin at via the --first flag.".to_string());
    } else if first.len() > MAX_REVISION_LEN {
        problems.push("The hash for --first is not valid.".to_string());
    } else if first.starts_with('-') {
        problems.push(format!("The value '{}' for --first is not a git commit.", first));
    }

    if let Some(last) = last {
        if last.is_empty() {
            problems.push("Please provide a git commit to end at via the --last flag.".to_string());
        } else if last.len() > MAX_REVISION_LEN {
            problems.push("The hash for --last is not valid.".to_string());
        } else if last.starts_with('-') {
            problems.push(format!("The value '{}' for --last is not a git commit.", last));
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ChangepackError::Validation(problems))
    }
}

/// Require `last` to name the checked-out revision.
///
/// `last` may be abbreviated, so it only has to be a prefix of `head`.
pub fn ensure_head_matches(last: &str, head: &str) -> Result<()> {
    if head.starts_with(last) {
        Ok(())
    } else {
        Err(ChangepackError::StateMismatch {
            required: last.to_string(),
            current: head.to_string(),
        })
    }
}

/// Require a `.git` entry in `cwd`.
///
/// Linked worktrees carry a `.git` file rather than a directory; both count.
pub fn ensure_repository_present(cwd: &Path) -> Result<()> {
    if cwd.join(".git").exists() {
        Ok(())
    } else {
        Err(ChangepackError::RepositoryAbsent)
    }
}
