//! Structural rewriting.
//!
//! A [`RewriteRule`] pairs a template with replacement text. Applying it
//! replaces every outermost match with the replacement, after substituting
//! `$NAME` and `$$$NAME` references with the captured source text. Matches
//! nested inside a replaced match are left alone.

use std::collections::HashSet;

use tracing::debug;

use crate::config::SearchConfig;
use crate::error::SyntaxError;
use crate::language::SupportedLanguage;
use crate::metavariables::{WILDCARD, count_dollars, extract_metavar_name};
use crate::parser::Parser;
use crate::search::SearchMatch;
use crate::template::Template;

const REWRITE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::rewriter");

/// A template and the text that replaces its matches.
#[derive(Debug)]
pub struct RewriteRule {
    template: Template,
    replacement: String,
}

impl RewriteRule {
    /// Creates a rewrite rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the replacement references a metavariable the
    /// template does not bind.
    pub fn new(template: Template, replacement: impl Into<String>) -> Result<Self, SyntaxError> {
        let text: String = replacement.into();

        let bound: HashSet<_> = template
            .metavariables()
            .iter()
            .map(|metavariable| metavariable.name.as_str())
            .collect();
        if let Some(unbound) = extract_replacement_vars(&text)
            .into_iter()
            .find(|name| name != WILDCARD && !bound.contains(name.as_str()))
        {
            return Err(SyntaxError::invalid_replacement(format!(
                "replacement references undefined metavariable: ${unbound}"
            )));
        }

        Ok(Self {
            template,
            replacement: text,
        })
    }

    /// Returns the template for this rule.
    #[must_use]
    pub const fn template(&self) -> &Template {
        &self.template
    }

    /// Returns the replacement text.
    #[must_use]
    pub fn replacement(&self) -> &str {
        &self.replacement
    }
}

/// Applies rewrite rules to source text.
#[derive(Debug, Clone)]
pub struct Rewriter {
    language: SupportedLanguage,
    config: SearchConfig,
}

impl Rewriter {
    /// Creates a rewriter for `language` with default limits.
    #[must_use]
    pub fn new(language: SupportedLanguage) -> Self {
        Self {
            language,
            config: SearchConfig::default(),
        }
    }

    /// Returns this rewriter with different search limits.
    #[must_use]
    pub const fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the language this rewriter is configured for.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Applies `rule` to `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the rule was compiled for another language, if
    /// parsing fails, or if a match does not fall on character boundaries.
    pub fn apply(&self, rule: &RewriteRule, source: &str) -> Result<RewriteResult, SyntaxError> {
        if rule.template.language() != self.language {
            return Err(SyntaxError::LanguageMismatch {
                rule: rule.template.language(),
                target: self.language,
            });
        }

        let mut parser = Parser::new(self.language)?;
        let parsed = parser.parse(source)?;
        let matches = outermost(rule.template.find_all_with(&parsed, &self.config));

        let mut output = source.to_owned();
        for found in matches.iter().rev() {
            let range = found.byte_range();
            if !output.is_char_boundary(range.start) || !output.is_char_boundary(range.end) {
                return Err(SyntaxError::MisalignedMatch { range });
            }
            output.replace_range(range, &substitute_metavariables(&rule.replacement, found));
        }

        debug!(
            target: REWRITE_TARGET,
            template = rule.template.source(),
            replacements = matches.len(),
            "applied rewrite rule"
        );

        Ok(RewriteResult {
            output,
            num_replacements: matches.len(),
        })
    }

    /// Applies `rules` in order, each to the output of the previous one.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`Rewriter::apply`].
    pub fn apply_all(
        &self,
        rules: &[RewriteRule],
        source: &str,
    ) -> Result<RewriteResult, SyntaxError> {
        let mut current = source.to_owned();
        let mut total_replacements: usize = 0;

        for rule in rules {
            let result = self.apply(rule, &current)?;
            total_replacements = total_replacements.saturating_add(result.num_replacements);
            current = result.output;
        }

        Ok(RewriteResult {
            output: current,
            num_replacements: total_replacements,
        })
    }
}

/// Result of a rewrite operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteResult {
    output: String,
    num_replacements: usize,
}

impl RewriteResult {
    /// Returns the transformed source code.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Consumes the result, returning the transformed source code.
    #[must_use]
    pub fn into_output(self) -> String {
        self.output
    }

    /// Returns the number of replacements made.
    #[must_use]
    pub const fn num_replacements(&self) -> usize {
        self.num_replacements
    }

    /// Returns whether any replacements were made.
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.num_replacements > 0
    }
}

/// Keeps matches not nested inside an earlier kept match.
///
/// Pre-order search reports ancestors before descendants, so the first match
/// covering a region is the outermost one.
fn outermost(matches: Vec<SearchMatch<'_>>) -> Vec<SearchMatch<'_>> {
    let mut kept: Vec<SearchMatch<'_>> = Vec::with_capacity(matches.len());
    for found in matches {
        let overlaps = kept
            .last()
            .is_some_and(|last| found.byte_range().start < last.byte_range().end);
        if !overlaps {
            kept.push(found);
        }
    }
    kept
}

/// Extracts metavariable references from a replacement.
fn extract_replacement_vars(replacement: &str) -> Vec<String> {
    let mut vars = Vec::new();
    let mut chars = replacement.char_indices().peekable();

    while let Some((_, ch)) = chars.next() {
        if ch != '$' {
            continue;
        }
        let dollars = count_dollars(&mut chars);
        let name = extract_metavar_name(&mut chars);
        if !name.is_empty() && (dollars == 1 || dollars == 3) {
            vars.push(name);
        }
    }

    vars
}

/// Substitutes captured text for metavariable references.
///
/// `$_` and `$$$_` expand to nothing. Anything else that is not a reference
/// is copied through unchanged.
fn substitute_metavariables(replacement: &str, found: &SearchMatch<'_>) -> String {
    let mut out = String::with_capacity(replacement.len());
    let mut chars = replacement.char_indices().peekable();

    while let Some((_, ch)) = chars.next() {
        if ch != '$' {
            out.push(ch);
            continue;
        }

        let dollars = count_dollars(&mut chars);
        let name = extract_metavar_name(&mut chars);
        let is_reference = !name.is_empty() && (dollars == 1 || dollars == 3);
        if is_reference && name == WILDCARD {
            continue;
        }
        match found.capture(&name).filter(|_| is_reference) {
            Some(capture) => out.push_str(capture.text()),
            None => {
                out.push_str(&"$".repeat(dollars));
                out.push_str(&name);
            }
        }
    }

    out
}
