//! Git command runner for changepack.
//!
//! Provides a thin wrapper around git commands with captured stdout/stderr
//! and structured error handling. All git invocations go through this module.

use crate::error::{ChangepackError, Result};
use std::path::Path;
use std::process::{Command, Output};
use tracing::debug;

/// Result of a successful git command execution.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Standard output from the command, exactly as git printed it.
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
}

impl GitOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }

    /// Standard output with surrounding whitespace removed.
    pub fn trimmed(&self) -> &str {
        self.stdout.trim()
    }
}

/// Run a git command with the specified working directory.
///
/// # Returns
///
/// * `Ok(GitOutput)` - On successful execution (exit code 0)
/// * `Err(ChangepackError::Git)` - If git cannot be spawned or exits non-zero
pub fn run_git<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<GitOutput> {
    let cwd = cwd.as_ref();
    debug!(cwd = %cwd.display(), args = ?args, "running git");

    let output = Command::new("git")
        .current_dir(cwd)
        .args(args)
        .output()
        .map_err(|e| {
            ChangepackError::Git(format!("failed to execute git {}: {}", subcommand(args), e))
        })?;

    let git_output = GitOutput::from_output(&output);

    if output.status.success() {
        Ok(git_output)
    } else {
        let exit_code = output.status.code().unwrap_or(-1);
        let error_msg = if git_output.stderr.is_empty() {
            git_output.trimmed().to_string()
        } else {
            git_output.stderr.clone()
        };

        Err(ChangepackError::Git(format!(
            "git {} failed (exit code {}): {}",
            subcommand(args),
            exit_code,
            error_msg
        )))
    }
}

/// First argument that is not a `-c key=value` override.
fn subcommand<'a>(args: &[&'a str]) -> &'a str {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if *arg == "-c" {
            iter.next();
            continue;
        }
        return *arg;
    }
    ""
}
