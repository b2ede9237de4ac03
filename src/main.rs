//! Changepack: package the files changed between two git commits.
//!
//! This is the main entry point for the `changepack` CLI. It parses
//! arguments, sets up logging, runs the pipeline, and maps errors to exit
//! codes.

mod archive;
mod changeset;
mod cli;
mod commands;
mod config;
mod error;
mod exit_codes;
mod gateway;
mod git;

#[cfg(test)]
mod test_support;

use cli::Cli;
use error::ChangepackError;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> ExitCode {
    let cli = match Cli::try_parse_args() {
        Ok(cli) => cli,
        Err(err) if cli::is_informational(&err) => err.exit(),
        Err(err) => return usage_failure(err),
    };

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: failed to install logger: {}", e);
    }

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => report(err),
    }
}

/// A missing git or repository is reported ahead of malformed flags.
fn usage_failure(err: clap::Error) -> ExitCode {
    if let Err(env_err) = commands::check_environment() {
        return report(env_err);
    }
    let _ = err.print();
    ExitCode::from(exit_codes::FAILURE as u8)
}

fn report(err: ChangepackError) -> ExitCode {
    for message in err.messages() {
        eprintln!("Error: {}", message);
    }
    ExitCode::from(err.exit_code() as u8)
}
