//! Metavariable syntax shared by templates and replacements.
//!
//! Templates use `$NAME`, `$_`, `$$$NAME` and `$$$_`. Before parsing, each
//! metavariable is replaced by a placeholder identifier the host grammar
//! accepts wherever an identifier may appear.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::SyntaxError;

const SINGLE_PLACEHOLDER_PREFIX: &str = "__HEDDLE_METAVAR_";
const MULTIPLE_PLACEHOLDER_PREFIX: &str = "__HEDDLE_METAVARS_";
const PLACEHOLDER_SUFFIX: &str = "__";

/// Name of the anonymous metavariable.
pub(crate) const WILDCARD: &str = "_";

/// A metavariable occurrence in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaVariable {
    /// The name without the `$` prefix.
    pub name: String,
    /// Whether the occurrence stands for one node or a run of siblings.
    pub kind: MetaVarKind,
    /// Byte offset of the first `$` in the template source.
    pub offset: usize,
}

impl MetaVariable {
    /// Returns whether this is `$_` or `$$$_`.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.name == WILDCARD
    }
}

/// How many nodes a metavariable stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaVarKind {
    /// Exactly one node (`$VAR`).
    Single,
    /// Zero or more sibling nodes (`$$$VAR`).
    Multiple,
}

/// A template with its metavariables replaced by placeholder identifiers.
#[derive(Debug)]
pub(crate) struct Normalised {
    pub(crate) text: String,
    pub(crate) metavariables: Vec<MetaVariable>,
}

/// Returns whether `c` is a valid first character for a metavariable name.
#[must_use]
pub(crate) const fn is_valid_metavar_start_char(c: char) -> bool {
    c.is_ascii_uppercase() || c == '_'
}

/// Returns whether `c` may continue a metavariable name.
#[must_use]
pub(crate) const fn is_valid_metavar_continuation_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'
}

/// Counts the `$` signs at the front of the stream, the first already taken.
pub(crate) fn count_dollars(chars: &mut Peekable<CharIndices<'_>>) -> usize {
    let mut dollars = 1;
    while chars.next_if(|(_, c)| *c == '$').is_some() {
        dollars += 1;
    }
    dollars
}

/// Extracts a metavariable name from a character stream.
///
/// The stream is positioned at the first character after the `$` prefix.
/// Returns an empty string if the next character is not a valid start.
pub(crate) fn extract_metavar_name(chars: &mut Peekable<CharIndices<'_>>) -> String {
    let mut name = String::new();
    if let Some((_, first)) = chars.next_if(|(_, c)| is_valid_metavar_start_char(*c)) {
        name.push(first);
        while let Some((_, c)) = chars.next_if(|(_, c)| is_valid_metavar_continuation_char(*c)) {
            name.push(c);
        }
    }
    name
}

/// Builds the identifier standing in for a metavariable during parsing.
#[must_use]
pub(crate) fn placeholder_for_metavar(name: &str, kind: MetaVarKind) -> String {
    let prefix = match kind {
        MetaVarKind::Single => SINGLE_PLACEHOLDER_PREFIX,
        MetaVarKind::Multiple => MULTIPLE_PLACEHOLDER_PREFIX,
    };
    format!("{prefix}{name}{PLACEHOLDER_SUFFIX}")
}

/// Recovers the metavariable behind a placeholder identifier.
#[must_use]
pub(crate) fn metavar_from_placeholder(text: &str) -> Option<(&str, MetaVarKind)> {
    let (rest, kind) = text
        .strip_prefix(SINGLE_PLACEHOLDER_PREFIX)
        .map(|rest| (rest, MetaVarKind::Single))
        .or_else(|| {
            text.strip_prefix(MULTIPLE_PLACEHOLDER_PREFIX)
                .map(|rest| (rest, MetaVarKind::Multiple))
        })?;
    rest.strip_suffix(PLACEHOLDER_SUFFIX)
        .filter(|name| !name.is_empty())
        .map(|name| (name, kind))
}

/// Replaces every metavariable in `source` by its placeholder.
///
/// # Errors
///
/// Returns [`SyntaxError::InvalidMetavariable`] for `$$` or more than three
/// `$` signs, and for a `$` prefix not followed by a valid name.
pub(crate) fn normalise(source: &str) -> Result<Normalised, SyntaxError> {
    let mut text = String::with_capacity(source.len());
    let mut metavariables = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        if ch != '$' {
            text.push(ch);
            continue;
        }

        let kind = match count_dollars(&mut chars) {
            1 => MetaVarKind::Single,
            3 => MetaVarKind::Multiple,
            count => {
                return Err(SyntaxError::invalid_metavariable(format!(
                    "metavariable at offset {offset} has invalid '$' prefix length ({count})"
                )));
            }
        };

        let name = extract_metavar_name(&mut chars);
        if name.is_empty() {
            return Err(SyntaxError::invalid_metavariable(format!(
                "metavariable at offset {offset} has no valid name"
            )));
        }

        text.push_str(&placeholder_for_metavar(&name, kind));
        metavariables.push(MetaVariable { name, kind, offset });
    }

    Ok(Normalised {
        text,
        metavariables,
    })
}
