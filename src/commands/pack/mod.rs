//! Implementation of the packaging run.
//!
//! # What a run does
//!
//! 1. Verifies git can be executed
//! 2. Verifies the working directory is a repository
//! 3. Validates `--first`/`--last`, reporting every problem together
//! 4. Defaults `--last` to HEAD, or requires HEAD to start with it
//! 5. Asks git for the paths changed between the two revisions
//! 6. Either prints that list verbatim (`--list`) or loads configuration,
//!    resolves the list and writes the archive (`build.zip` unless
//!    configured otherwise)

mod validation;


use crate::archive::{build_archive, ArchiveSummary};
use crate::changeset::{build_exclude_set, filter_excluded, parse_change_records, resolve_records};
use crate::cli::Cli;
use crate::config::Config;
use crate::error::{ChangepackError, Result};
use crate::gateway::Gateway;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

pub use validation::{ensure_head_matches, ensure_repository_present, validate_revisions};

/// Parsed flags for one run.
#[derive(Debug, Clone, Default)]
pub struct PackRequest {
    pub first: String,
    /// `None` means "the current HEAD".
    pub last: Option<String>,
    pub verbose: bool,
    pub list: bool,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

impl From<Cli> for PackRequest {
    fn from(cli: Cli) -> Self {
        Self {
            first: cli.first.unwrap_or_default(),
            last: cli.last,
            verbose: cli.verbose,
            list: cli.list,
            output: cli.output,
            config: cli.config,
        }
    }
}

/// How a successful run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackOutcome {
    /// The change list was printed.
    Listed,
    /// Nothing changed; no archive was written.
    NoChanges,
    /// The archive was written to `path`.
    Archived {
        path: PathBuf,
        summary: ArchiveSummary,
    },
}

/// Check that git runs and `cwd` is a repository.
pub fn preflight(cwd: &Path, gateway: &dyn Gateway) -> Result<()> {
    if !gateway.tool_available() {
        return Err(ChangepackError::ToolUnavailable);
    }
    ensure_repository_present(cwd)
}

/// Run the packaging pipeline in `cwd`.
///
/// List output and verbose progress go to `out`.
pub fn execute(
    request: &PackRequest,
    cwd: &Path,
    gateway: &dyn Gateway,
    out: &mut dyn Write,
) -> Result<PackOutcome> {
    preflight(cwd, gateway)?;
    validate_revisions(&request.first, request.last.as_deref())?;

    let head = gateway.current_head()?;
    let last = match &request.last {
        Some(last) => {
            ensure_head_matches(last, &head)?;
            last.clone()
        }
        None => head,
    };

    let raw = gateway.changed_paths(&request.first, &last)?;

    if request.list {
        out.write_all(raw.as_bytes())?;
        return Ok(PackOutcome::Listed);
    }

    let config = Config::discover(cwd, request.config.as_deref())?;

    if request.verbose {
        writeln!(out, "first: {}", request.first)?;
        writeln!(out, "last: {}", last)?;
    }

    let output = cwd.join(request.output.as_deref().unwrap_or(Path::new(&config.output)));

    let excludes = build_exclude_set(&config.exclude)?;
    let records: Vec<String> = filter_excluded(parse_change_records(&raw), &excludes)
        .into_iter()
        // A committed archive from an earlier run would be truncated before it is read.
        .filter(|record| {
            let is_output = cwd.join(record) == output;
            if is_output {
                debug!(path = %output.display(), "leaving archive output out of the change set");
            }
            !is_output
        })
        .collect();
    let entries = resolve_records(&records, cwd);

    if entries.is_empty() {
        if request.verbose {
            writeln!(out, "No changed files between {} and {}.", request.first, last)?;
        }
        return Ok(PackOutcome::NoChanges);
    }

    let mut progress_error = None;
    let summary = build_archive(&output, cwd, &entries, config.compression, |name| {
        if request.verbose
            && progress_error.is_none()
            && let Err(e) = writeln!(out, "adding: {}", name)
        {
            progress_error = Some(e);
        }
    })?;
    if let Some(e) = progress_error {
        return Err(e.into());
    }

    if request.verbose {
        writeln!(
            out,
            "Wrote {} ({} files, {} directories, {} bytes).",
            output.display(),
            summary.files,
            summary.directories,
            summary.bytes
        )?;
    }

    Ok(PackOutcome::Archived {
        path: output,
        summary,
    })
}
