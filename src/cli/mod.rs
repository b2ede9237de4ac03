//! CLI argument parsing for changepack.
//!
//! Uses clap derive macros for declarative argument definitions. Go-style
//! single-dash long flags (`-first abc`, `-list`) are also accepted; they are
//! rewritten to their double-dash form before parsing.

use clap::Parser;
use clap::error::{Error, ErrorKind};
use std::ffi::OsString;
use std::path::PathBuf;

/// Package the files changed between two git commits into a zip archive.
///
/// Changes are computed between `--first` (exclusive) and `--last`
/// (inclusive). `--last` must be the revision currently checked out, since
/// file contents are read from the working tree.
#[derive(Parser, Debug)]
#[command(name = "changepack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The git commit to begin at (exclusive).
    #[arg(long, value_name = "REV")]
    pub first: Option<String>,

    /// The git commit to end at (inclusive). Defaults to the current HEAD.
    #[arg(long, value_name = "REV")]
    pub last: Option<String>,

    /// Toggle verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the changed paths instead of building an archive.
    #[arg(long)]
    pub list: bool,

    /// Archive path, overriding the configured output (default: build.zip).
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Configuration file (default: .changepack.yaml when present).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Long flags that may be spelled with a single dash.
const SINGLE_DASH_LONG_FLAGS: &[&str] = &["first", "last", "list", "output", "config", "verbose"];

/// Flags whose value may follow as a separate argument.
const VALUE_FLAGS: &[&str] = &["--first", "--last", "--output", "--config", "-o"];

impl Cli {
    /// Parse command line arguments, leaving usage errors to the caller.
    pub fn try_parse_args() -> Result<Self, Error> {
        Cli::try_parse_from(normalize_args(std::env::args_os()))
    }
}

/// True for `--help` and `--version`, which clap reports as errors.
pub fn is_informational(err: &Error) -> bool {
    matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion)
}

/// Rewrite `-first`, `-last=abc` and friends to `--first`, `--last=abc`.
///
/// The argument after a value-taking flag is a value and is never
/// rewritten, nor is anything after `--`.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut normalized = Vec::new();
    let mut expecting_value = false;
    let mut positional_only = false;

    for arg in args {
        if expecting_value || positional_only {
            expecting_value = false;
            normalized.push(arg);
            continue;
        }

        let arg = arg
            .to_str()
            .and_then(single_dash_to_long)
            .unwrap_or(arg);
        match arg.to_str() {
            Some("--") => positional_only = true,
            Some(s) => expecting_value = VALUE_FLAGS.contains(&s),
            None => {}
        }
        normalized.push(arg);
    }
    normalized
}

fn single_dash_to_long(arg: &str) -> Option<OsString> {
    let rest = arg.strip_prefix('-')?;
    if rest.starts_with('-') {
        return None;
    }
    let name = rest.split('=').next().unwrap_or(rest);
    SINGLE_DASH_LONG_FLAGS
        .contains(&name)
        .then(|| OsString::from(format!("-{}", arg)))
}
