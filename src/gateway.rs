//! Version-control gateway.
//!
//! The orchestrator only talks to git through the [`Gateway`] trait so tests
//! can substitute canned answers for a real repository.

use crate::error::Result;
use crate::git::run_git;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Change types included in a change set: Added, Copied, Modified, Renamed,
/// and Type-changed. Deletions are never packaged.
pub const DIFF_FILTER: &str = "--diff-filter=ACMRT";

/// Request/response access to the version-control tool.
pub trait Gateway {
    /// Returns true if the tool can be executed and reports a version.
    fn tool_available(&self) -> bool;

    /// Identifier of the currently checked-out revision.
    fn current_head(&self) -> Result<String>;

    /// Raw newline-delimited list of paths changed between `first` and `last`.
    fn changed_paths(&self, first: &str, last: &str) -> Result<String>;
}

/// [`Gateway`] backed by the `git` executable on PATH.
#[derive(Debug, Clone)]
pub struct GitGateway {
    cwd: PathBuf,
}

impl GitGateway {
    pub fn new<P: AsRef<Path>>(cwd: P) -> Self {
        Self {
            cwd: cwd.as_ref().to_path_buf(),
        }
    }
}

impl Gateway for GitGateway {
    fn tool_available(&self) -> bool {
        Command::new("git")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    fn current_head(&self) -> Result<String> {
        let output = run_git(&self.cwd, &["rev-parse", "HEAD"])?;
        Ok(output.trimmed().to_string())
    }

    fn changed_paths(&self, first: &str, last: &str) -> Result<String> {
        let output = run_git(
            &self.cwd,
            &[
                "-c",
                "core.quotepath=off",
                "diff-tree",
                "-r",
                "--no-commit-id",
                "--name-only",
                DIFF_FILTER,
                "--end-of-options",
                first,
                last,
            ],
        )?;
        Ok(output.stdout)
    }
}
