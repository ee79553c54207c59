//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use heddle_syntax::SupportedLanguage;

use crate::config::LogFormat;

/// Structural search and rewriting over syntax trees.
#[derive(Parser, Debug)]
#[command(name = "heddle", version, disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// Logging options.
    #[command(flatten)]
    pub(crate) logging: LoggingArgs,
    /// TOML configuration file; `HEDDLE_CONFIG_PATH` also names one.
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) config_path: Option<PathBuf>,
    /// The command to run.
    #[command(subcommand)]
    pub(crate) command: Command,
}

/// Logging options shared by every command.
#[derive(Args, Debug, Clone)]
pub(crate) struct LoggingArgs {
    /// Tracing filter directives, for example `heddle_pattern=trace`
    /// [default: warn].
    #[arg(long, global = true)]
    pub(crate) log_filter: Option<String>,
    /// Format of log lines written to stderr [default: compact].
    #[arg(long, global = true)]
    pub(crate) log_format: Option<LogFormat>,
}

/// Commands understood by the CLI.
#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Prints every match of a template.
    Grep(GrepArgs),
    /// Replaces every outermost match of a template.
    Rewrite(RewriteArgs),
    /// Prints the pattern a template compiles to.
    Explain(ExplainArgs),
}

impl Command {
    /// Returns the per-file match cap given on the command line, if any.
    #[must_use]
    pub(crate) const fn max_matches(&self) -> Option<usize> {
        match self {
            Self::Grep(GrepArgs { source, .. }) | Self::Rewrite(RewriteArgs { source, .. }) => {
                source.max_matches
            }
            Self::Explain(_) => None,
        }
    }
}

/// Options shared by commands that read source files.
#[derive(Args, Debug)]
pub(crate) struct SourceArgs {
    /// Template with `$VAR`, `$_` and `$$$VAR` metavariables.
    #[arg(long, short)]
    pub(crate) pattern: String,
    /// Language of the template and files; detected from each file's
    /// extension when omitted.
    #[arg(long, short)]
    pub(crate) language: Option<SupportedLanguage>,
    /// Most matches reported per file.
    #[arg(long)]
    pub(crate) max_matches: Option<usize>,
    /// Files to process.
    #[arg(required = true, value_name = "PATH")]
    pub(crate) paths: Vec<PathBuf>,
}

/// Arguments for `heddle grep`.
#[derive(Args, Debug)]
pub(crate) struct GrepArgs {
    /// Template and files to search.
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    /// Emit one JSON object per match instead of `path:line:column: text`.
    #[arg(long)]
    pub(crate) json: bool,
}

/// Arguments for `heddle rewrite`.
#[derive(Args, Debug)]
pub(crate) struct RewriteArgs {
    /// Template and files to rewrite.
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    /// Replacement text; may reference the template's metavariables.
    #[arg(long, short)]
    pub(crate) replacement: String,
    /// Write changes back to the files instead of printing them.
    #[arg(long)]
    pub(crate) in_place: bool,
}

/// Arguments for `heddle explain`.
#[derive(Args, Debug)]
pub(crate) struct ExplainArgs {
    /// Template to compile.
    #[arg(long, short)]
    pub(crate) pattern: String,
    /// Language the template is written in.
    #[arg(long, short)]
    pub(crate) language: SupportedLanguage,
}
