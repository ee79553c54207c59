//! Diagnostic rendering of patterns.
//!
//! Patterns render as S-expressions: literals as `(kind "text" role: child)`
//! (the `child` role label is omitted, and tokens whose kind is their text
//! render as just `"text"`), wildcards as `$_` or `$NAME`,
//! captures as `$NAME=inner`, quantifiers with regex suffixes, choices as
//! `(a | b)`, back-references as `\NAME` and adapters as `<role inner>`.
//! The output exists for logs and error messages; nothing parses it back.

use std::fmt::{self, Write};

use heddle_tree::Role;

use crate::compile::Pattern;
use crate::node::{Literal, PatternNode, Repeat};

/// Writes the diagnostic form of `node` to `out`.
///
/// # Errors
///
/// Propagates errors from the writer.
pub fn render<W: Write>(node: &PatternNode, out: &mut W) -> fmt::Result {
    match node {
        PatternNode::Any(None) => out.write_str("$_"),
        PatternNode::Any(Some(name)) => write!(out, "${name}"),
        PatternNode::Capture(capture) => {
            write!(out, "${}=", capture.name)?;
            render(&capture.inner, out)
        }
        PatternNode::Optional(inner) => {
            render(inner, out)?;
            out.write_char('?')
        }
        PatternNode::Repeat(repeat) => render_repeat(repeat, out),
        PatternNode::Choice(alternatives) => {
            out.write_char('(')?;
            for (index, alternative) in alternatives.iter().enumerate() {
                if index > 0 {
                    out.write_str(" | ")?;
                }
                render(alternative, out)?;
            }
            out.write_char(')')
        }
        PatternNode::Backreference(name) => write!(out, "\\{name}"),
        PatternNode::Literal(literal) => render_literal(literal, out),
        PatternNode::Role(adapter) => {
            write!(out, "<{} ", adapter.kind)?;
            render(&adapter.pattern, out)?;
            out.write_char('>')
        }
    }
}

fn render_repeat<W: Write>(repeat: &Repeat, out: &mut W) -> fmt::Result {
    render(&repeat.inner, out)?;
    match (repeat.min, repeat.max) {
        (0, None) => out.write_char('*'),
        (1, None) => out.write_char('+'),
        (min, None) => write!(out, "{{{min},}}"),
        (min, Some(max)) => write!(out, "{{{min},{max}}}"),
    }
}

fn render_literal<W: Write>(literal: &Literal, out: &mut W) -> fmt::Result {
    // Anonymous tokens are their own kind.
    if let Some(text) = &literal.text
        && literal.children.is_empty()
        && *text == literal.kind
    {
        return write!(out, "{text:?}");
    }
    write!(out, "({}", literal.kind)?;
    if let Some(text) = &literal.text {
        write!(out, " {text:?}")?;
    }
    for child in &literal.children {
        out.write_char(' ')?;
        if child.role != Role::CHILD {
            write!(out, "{}: ", child.role)?;
        }
        render(&child.pattern, out)?;
    }
    out.write_char(')')
}

impl fmt::Display for PatternNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self, f)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, element) in self.elements().iter().enumerate() {
            if index > 0 {
                f.write_char(' ')?;
            }
            render(element, f)?;
        }
        Ok(())
    }
}
