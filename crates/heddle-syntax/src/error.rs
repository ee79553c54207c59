//! Error types for parsing, template compilation and rewriting.
//!
//! A template that fails to match is not an error; these variants cover
//! inputs the front end cannot turn into a tree or a pattern at all.

use std::ops::Range;
use std::path::PathBuf;

use heddle_pattern::PatternError;
use thiserror::Error;

use crate::language::SupportedLanguage;

/// Errors raised by the syntax front end.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyntaxError {
    /// The bundled grammar could not be loaded into the Tree-sitter runtime.
    #[error("grammar for {language} is incompatible with tree-sitter: {message}")]
    Grammar {
        /// Language whose grammar was rejected.
        language: SupportedLanguage,
        /// Runtime diagnostic.
        message: String,
    },

    /// No grammar handles files with this extension.
    #[error("unsupported file extension: {extension}")]
    UnsupportedExtension {
        /// Extension without the leading dot.
        extension: String,
    },

    /// The path has no extension to infer a language from.
    #[error("cannot infer a language for {}: the path has no extension", path.display())]
    MissingExtension {
        /// Offending path.
        path: PathBuf,
    },

    /// Tree-sitter returned no tree.
    #[error("tree-sitter produced no tree for {language} source")]
    Parse {
        /// Language being parsed.
        language: SupportedLanguage,
    },

    /// The template text does not parse to a single node.
    #[error("invalid template for {language}: {message}")]
    InvalidTemplate {
        /// Language the template is written in.
        language: SupportedLanguage,
        /// What is wrong with it.
        message: String,
    },

    /// A `$` sequence is malformed or a metavariable is used inconsistently.
    #[error("invalid metavariable syntax: {message}")]
    InvalidMetavariable {
        /// What is wrong with it.
        message: String,
    },

    /// The pattern built from a template failed validation.
    #[error("malformed pattern: {0}")]
    MalformedPattern(#[from] PatternError),

    /// A replacement refers to metavariables the template never binds.
    #[error("invalid replacement template: {message}")]
    InvalidReplacement {
        /// What is wrong with it.
        message: String,
    },

    /// A rewrite rule was applied to source in another language.
    #[error("rewrite rule is written in {rule} but the source is {target}")]
    LanguageMismatch {
        /// Language of the rule's template.
        rule: SupportedLanguage,
        /// Language of the rewriter.
        target: SupportedLanguage,
    },

    /// A match does not start and end on character boundaries.
    #[error("match at bytes {}..{} splits a character", range.start, range.end)]
    MisalignedMatch {
        /// Byte range of the match.
        range: Range<usize>,
    },
}

impl SyntaxError {
    /// Wraps a grammar loading failure.
    #[must_use]
    pub fn grammar(language: SupportedLanguage, message: impl Into<String>) -> Self {
        Self::Grammar {
            language,
            message: message.into(),
        }
    }

    /// Reports an extension no grammar handles.
    #[must_use]
    pub fn unsupported_extension(extension: impl Into<String>) -> Self {
        Self::UnsupportedExtension {
            extension: extension.into(),
        }
    }

    /// Reports a template that cannot become a pattern.
    #[must_use]
    pub fn invalid_template(language: SupportedLanguage, message: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            language,
            message: message.into(),
        }
    }

    /// Reports bad metavariable syntax or usage.
    #[must_use]
    pub fn invalid_metavariable(message: impl Into<String>) -> Self {
        Self::InvalidMetavariable {
            message: message.into(),
        }
    }

    /// Reports a replacement that cannot be expanded.
    #[must_use]
    pub fn invalid_replacement(message: impl Into<String>) -> Self {
        Self::InvalidReplacement {
            message: message.into(),
        }
    }
}
