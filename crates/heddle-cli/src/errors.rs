//! Errors reported by the CLI.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use heddle_syntax::SyntaxError;
use ortho_config::OrthoError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

/// Failures that stop a command and exit with status 2.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Parsing, template or rewrite failure from the syntax layer.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// Logging could not be configured.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    /// Defaults, configuration files, environment and flags could not be
    /// merged into a valid configuration.
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<OrthoError>),
    /// A source file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    ReadSource {
        /// File being processed.
        path: PathBuf,
        /// Underlying IO failure.
        source: io::Error,
    },
    /// A rewritten file could not be written back.
    #[error("failed to write {}: {source}", path.display())]
    WriteSource {
        /// File being rewritten.
        path: PathBuf,
        /// Underlying IO failure.
        source: io::Error,
    },
    /// A match could not be encoded as JSON.
    #[error("failed to encode match: {0}")]
    Encode(#[from] serde_json::Error),
    /// Standard output could not be written.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}
