use crate::error::{ChangepackError, Result};
use crate::gateway::Gateway;
use std::cell::RefCell;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// A repository with one commit containing `README.md`.
pub(crate) fn create_test_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path();

    git(path, &["init"]);
    // Ensure the repo uses a deterministic default branch name across environments.
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);

    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test User"]);

    std::fs::write(path.join("README.md"), "# Test\n").unwrap();
    git(path, &["add", "-A"]);
    git(path, &["commit", "-m", "Initial commit"]);

    temp_dir
}

/// Write `files` (relative path, content) under `repo_dir` and commit everything.
pub(crate) fn commit_files(repo_dir: &Path, files: &[(&str, &str)], message: &str) {
    write_files(repo_dir, files);
    git(repo_dir, &["add", "-A"]);
    git(repo_dir, &["commit", "-m", message]);
}

pub(crate) fn write_files(base: &Path, files: &[(&str, &str)]) {
    for (rel, content) in files {
        let full = base.join(rel);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full, content).unwrap();
    }
}

/// Trimmed stdout of a git command that must succeed.
pub(crate) fn git_stdout(repo_dir: &Path, args: &[&str]) -> String {
    String::from_utf8_lossy(&git(repo_dir, args).stdout)
        .trim()
        .to_string()
}

fn git(repo_dir: &Path, args: &[&str]) -> std::process::Output {
    let output = Command::new("git")
        .current_dir(repo_dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute git {}: {}", args.join(" "), e));

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "git {} failed (exit code {:?})\nstdout:\n{}\nstderr:\n{}",
            args.join(" "),
            output.status.code(),
            stdout,
            stderr
        );
    }

    output
}

/// Canned [`Gateway`] that records the revision pair it was asked to diff.
pub(crate) struct FakeGateway {
    pub available: bool,
    pub head: std::result::Result<String, String>,
    pub changes: std::result::Result<String, String>,
    pub diff_calls: RefCell<Vec<(String, String)>>,
}

impl FakeGateway {
    pub(crate) fn new(head: &str, changes: &str) -> Self {
        Self {
            available: true,
            head: Ok(head.to_string()),
            changes: Ok(changes.to_string()),
            diff_calls: RefCell::new(Vec::new()),
        }
    }
}

impl Gateway for FakeGateway {
    fn tool_available(&self) -> bool {
        self.available
    }

    fn current_head(&self) -> Result<String> {
        self.head.clone().map_err(ChangepackError::Git)
    }

    fn changed_paths(&self, first: &str, last: &str) -> Result<String> {
        self.diff_calls
            .borrow_mut()
            .push((first.to_string(), last.to_string()));
        self.changes.clone().map_err(ChangepackError::Git)
    }
}
