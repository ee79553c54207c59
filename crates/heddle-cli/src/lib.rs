//! Command-line runtime for the heddle structural search tool.
//!
//! [`run`] owns argument parsing, logging initialisation, configuration
//! loading and command dispatch. It takes its output streams as parameters
//! so tests can drive it in-process with in-memory buffers.
//!
//! Exit status follows `grep`: 0 when something matched, 1 when nothing
//! did, and 2 on any error.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

mod cli;
mod commands;
mod config;
mod errors;
mod telemetry;

use cli::{Cli, Command};
use commands::Outcome;
use errors::CliError;

const RUN_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::run");
const NO_MATCH: u8 = 1;
const FAILURE: u8 = 2;

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            let rendered = error.render();
            let written = if error.use_stderr() {
                write!(stderr, "{rendered}")
            } else {
                write!(stdout, "{rendered}")
            };
            drop(written);
            return ExitCode::from(u8::try_from(error.exit_code()).unwrap_or(FAILURE));
        }
    };

    match execute(&cli, stdout, stderr) {
        Ok(Outcome::Success) => ExitCode::SUCCESS,
        Ok(Outcome::NoMatch) => ExitCode::from(NO_MATCH),
        Err(error) => {
            drop(writeln!(stderr, "heddle: {error}"));
            ExitCode::from(FAILURE)
        }
    }
}

fn execute<W: Write, E: Write>(
    cli: &Cli,
    stdout: &mut W,
    stderr: &mut E,
) -> Result<Outcome, CliError> {
    let config = config::load(cli).map_err(CliError::LoadConfiguration)?;
    telemetry::initialise(&config.log_filter, config.log_format)?;
    let search_config = config.search_limits();
    debug!(
        target: RUN_TARGET,
        max_matches = search_config.max_matches,
        max_file_bytes = search_config.max_file_bytes,
        "loaded search limits"
    );

    let outcome = match &cli.command {
        Command::Grep(args) => commands::grep(args, search_config, stdout)?,
        Command::Rewrite(args) => commands::rewrite(args, search_config, stdout, stderr)?,
        Command::Explain(args) => commands::explain(args, stdout)?,
    };
    stdout.flush()?;
    Ok(outcome)
}

#[cfg(test)]
mod tests;
