//! Layered configuration for the CLI: log output and search limits.
//!
//! Values resolve through `ortho_config` in four layers, lowest first:
//! built-in defaults, a TOML file (named by `--config-path` or
//! `HEDDLE_CONFIG_PATH`, otherwise discovered as `.heddle.toml`),
//! `HEDDLE_*` environment variables and finally command-line flags.
//!
//! The CLI parses its own arguments with clap, so only the configuration
//! flags a user actually passed are forwarded to the loader.

use std::ffi::OsString;
use std::sync::Arc;

use heddle_syntax::SearchConfig;
use ortho_config::{OrthoConfig, OrthoError};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::cli::Cli;

/// Default tracing filter: warnings and errors only.
pub(crate) const DEFAULT_LOG_FILTER: &str = "warn";

/// Output format used by the tracing subscriber.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub(crate) enum LogFormat {
    /// Single-line human readable records.
    #[default]
    Compact,
    /// One JSON object per record.
    Json,
}

/// Resolved CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "HEDDLE")]
pub(crate) struct Config {
    /// Tracing filter directives, for example `heddle_pattern=trace`.
    #[ortho_config(default = DEFAULT_LOG_FILTER.to_owned())]
    pub(crate) log_filter: String,
    /// Format of log lines written to stderr.
    #[ortho_config(default = LogFormat::Compact)]
    pub(crate) log_format: LogFormat,
    /// Most matches reported per file.
    #[ortho_config(default = SearchConfig::DEFAULT_MAX_MATCHES)]
    pub(crate) max_matches: usize,
    /// Largest file, in bytes, handed to the parser.
    #[ortho_config(default = SearchConfig::DEFAULT_MAX_FILE_BYTES)]
    pub(crate) max_file_bytes: u64,
}

impl Config {
    /// Returns the search limits carried by this configuration.
    #[must_use]
    pub(crate) const fn search_limits(&self) -> SearchConfig {
        SearchConfig {
            max_matches: self.max_matches,
            max_file_bytes: self.max_file_bytes,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let limits = SearchConfig::default();
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
            log_format: LogFormat::default(),
            max_matches: limits.max_matches,
            max_file_bytes: limits.max_file_bytes,
        }
    }
}

/// Loads the configuration, layering any flags given on the command line
/// over the environment, the configuration file and the defaults.
pub(crate) fn load(cli: &Cli) -> Result<Config, Arc<OrthoError>> {
    Config::load_from_iter(config_arguments(cli))
}

/// Rebuilds the argument list the loader understands from the flags the
/// user passed. Flags left unset are omitted so lower layers show through.
fn config_arguments(cli: &Cli) -> Vec<OsString> {
    let mut arguments = vec![OsString::from(env!("CARGO_PKG_NAME"))];
    let mut push = |flag: &str, value: OsString| {
        arguments.push(OsString::from(flag));
        arguments.push(value);
    };

    if let Some(path) = &cli.config_path {
        push("--config-path", path.clone().into_os_string());
    }
    if let Some(filter) = &cli.logging.log_filter {
        push("--log-filter", OsString::from(filter));
    }
    if let Some(format) = cli.logging.log_format {
        push("--log-format", OsString::from(format.to_string()));
    }
    if let Some(max) = cli.command.max_matches() {
        push("--max-matches", OsString::from(max.to_string()));
    }
    arguments
}
