//! Command implementations for changepack.
//!
//! This module binds the parsed CLI to the process environment: the current
//! working directory, the real git gateway, and stdout.

pub mod pack;

use crate::cli::Cli;
use crate::error::{ChangepackError, Result};
use crate::gateway::GitGateway;
use pack::{PackOutcome, PackRequest};
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

fn current_dir() -> Result<PathBuf> {
    env::current_dir().map_err(|e| {
        ChangepackError::Config(format!("failed to get current working directory: {}", e))
    })
}

/// Check that git is installed and the current directory is a repository.
pub fn check_environment() -> Result<()> {
    let cwd = current_dir()?;
    pack::preflight(&cwd, &GitGateway::new(&cwd))
}

/// Run changepack for the current process.
pub fn dispatch(cli: Cli) -> Result<()> {
    let cwd = current_dir()?;
    let gateway = GitGateway::new(&cwd);
    let request = PackRequest::from(cli);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = pack::execute(&request, &cwd, &gateway, &mut out)?;
    out.flush()?;

    match outcome {
        PackOutcome::Archived { path, summary } => {
            info!(path = %path.display(), files = summary.files, "archive complete")
        }
        PackOutcome::NoChanges => info!("no changes to package"),
        PackOutcome::Listed => {}
    }
    Ok(())
}
