//! CLI entrypoint for the heddle structural search tool.
//!
//! The binary delegates to [`heddle_cli::run`], which parses arguments,
//! initialises logging, loads configuration and runs the selected command.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    heddle_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
