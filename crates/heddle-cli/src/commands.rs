//! Implementations of the `grep`, `rewrite` and `explain` commands.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::io::Write;
use std::path::Path;

use heddle_syntax::{
    Parser, RewriteRule, Rewriter, SearchConfig, SearchMatch, SupportedLanguage, Template,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cli::{ExplainArgs, GrepArgs, RewriteArgs};
use crate::errors::CliError;

const COMMAND_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::commands");

/// Result of a command that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// The command found, changed or printed something.
    Success,
    /// The command ran but the template matched nowhere.
    NoMatch,
}

/// Values compiled once per language and reused across files.
struct PerLanguage<T> {
    fixed: Option<SupportedLanguage>,
    compiled: HashMap<SupportedLanguage, T>,
}

impl<T> PerLanguage<T> {
    fn new(fixed: Option<SupportedLanguage>) -> Self {
        Self {
            fixed,
            compiled: HashMap::new(),
        }
    }

    fn for_path(
        &mut self,
        path: &Path,
        build: impl FnOnce(SupportedLanguage) -> Result<T, CliError>,
    ) -> Result<&T, CliError> {
        let language = match self.fixed {
            Some(language) => language,
            None => SupportedLanguage::detect(path)?,
        };
        match self.compiled.entry(language) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => Ok(entry.insert(build(language)?)),
        }
    }
}

/// Reads a source file, or returns `None` when it exceeds the size limit.
fn read_source(path: &Path, config: &SearchConfig) -> Result<Option<String>, CliError> {
    let read_error = |source| CliError::ReadSource {
        path: path.to_path_buf(),
        source,
    };
    let metadata = fs::metadata(path).map_err(read_error)?;
    if !config.admits(metadata.len()) {
        warn!(
            target: COMMAND_TARGET,
            path = %path.display(),
            bytes = metadata.len(),
            limit = config.max_file_bytes,
            "skipping file larger than the configured limit"
        );
        return Ok(None);
    }
    fs::read_to_string(path).map(Some).map_err(read_error)
}

/// Prints every match of the template in each file.
pub(crate) fn grep<W: Write>(
    args: &GrepArgs,
    config: SearchConfig,
    stdout: &mut W,
) -> Result<Outcome, CliError> {
    let mut templates = PerLanguage::new(args.source.language);
    let mut total = 0_usize;

    for path in &args.source.paths {
        let Some(text) = read_source(path, &config)? else {
            continue;
        };
        let template = templates.for_path(path, |language| {
            Ok(Template::compile(&args.source.pattern, language)?)
        })?;
        let parsed = Parser::new(template.language())?.parse(&text)?;
        let found = template.find_all_with(&parsed, &config);
        debug!(
            target: COMMAND_TARGET,
            path = %path.display(),
            matches = found.len(),
            "searched file"
        );
        for search_match in &found {
            if args.json {
                write_json(stdout, path, search_match)?;
            } else {
                write_line(stdout, path, search_match)?;
            }
        }
        total = total.saturating_add(found.len());
    }

    info!(target: COMMAND_TARGET, matches = total, "grep finished");
    Ok(if total == 0 {
        Outcome::NoMatch
    } else {
        Outcome::Success
    })
}

fn write_line<W: Write>(
    stdout: &mut W,
    path: &Path,
    search_match: &SearchMatch<'_>,
) -> Result<(), CliError> {
    let first_line = search_match.text().lines().next().unwrap_or_default();
    writeln!(
        stdout,
        "{}:{}: {first_line}",
        path.display(),
        search_match.start_position()
    )?;
    Ok(())
}

/// One match as emitted by `grep --json`.
#[derive(Debug, Serialize)]
struct MatchRecord<'a> {
    path: &'a Path,
    line: u32,
    column: u32,
    end_line: u32,
    end_column: u32,
    text: &'a str,
    captures: BTreeMap<&'a str, &'a str>,
}

impl<'a> MatchRecord<'a> {
    fn new(path: &'a Path, search_match: &'a SearchMatch<'a>) -> Self {
        let start = search_match.start_position();
        let end = search_match.end_position();
        Self {
            path,
            line: start.line,
            column: start.column,
            end_line: end.line,
            end_column: end.column,
            text: search_match.text(),
            captures: search_match
                .captures()
                .iter()
                .map(|(name, value)| (name.as_str(), value.text()))
                .collect(),
        }
    }
}

fn write_json<W: Write>(
    stdout: &mut W,
    path: &Path,
    search_match: &SearchMatch<'_>,
) -> Result<(), CliError> {
    serde_json::to_writer(&mut *stdout, &MatchRecord::new(path, search_match))?;
    writeln!(stdout)?;
    Ok(())
}

/// Rewrites each file, printing the result or writing it back in place.
pub(crate) fn rewrite<W: Write, E: Write>(
    args: &RewriteArgs,
    config: SearchConfig,
    stdout: &mut W,
    stderr: &mut E,
) -> Result<Outcome, CliError> {
    let mut rules = PerLanguage::new(args.source.language);
    let mut replacements = 0_usize;
    let mut changed_files = 0_usize;

    for path in &args.source.paths {
        let Some(text) = read_source(path, &config)? else {
            continue;
        };
        let rule = rules.for_path(path, |language| {
            let template = Template::compile(&args.source.pattern, language)?;
            Ok(RewriteRule::new(template, args.replacement.as_str())?)
        })?;
        let rewriter = Rewriter::new(rule.template().language()).with_config(config);
        let result = rewriter.apply(rule, &text)?;
        replacements = replacements.saturating_add(result.num_replacements());

        if result.has_changes() {
            changed_files = changed_files.saturating_add(1);
        }
        if args.in_place {
            if result.has_changes() {
                fs::write(path, result.output()).map_err(|source| CliError::WriteSource {
                    path: path.to_path_buf(),
                    source,
                })?;
            }
        } else {
            stdout.write_all(result.output().as_bytes())?;
        }
    }

    writeln!(
        stderr,
        "{replacements} replacement(s) in {changed_files} file(s)"
    )?;
    Ok(if replacements == 0 {
        Outcome::NoMatch
    } else {
        Outcome::Success
    })
}

/// Prints the pattern a template compiles to.
pub(crate) fn explain<W: Write>(args: &ExplainArgs, stdout: &mut W) -> Result<Outcome, CliError> {
    let template = Template::compile(&args.pattern, args.language)?;
    writeln!(stdout, "{template}")?;
    Ok(Outcome::Success)
}
