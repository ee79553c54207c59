//! Text templates compiled into structural patterns.
//!
//! A template is a fragment of host-language code with metavariables in place
//! of the parts that may vary:
//!
//! - `$VAR` matches one node and captures it as `VAR`; later occurrences of
//!   `$VAR` must match content equal to the first
//! - `$_` matches one node without capturing it
//! - `$$$VAR` matches a run of zero or more siblings and captures them
//! - `$$$_` matches a run of siblings without capturing them
//!
//! Names start with an uppercase letter or underscore, followed by uppercase
//! letters, digits, or underscores.
//!
//! Compilation parses the template (retrying inside a function body when the
//! fragment does not parse on its own), finds the node the template denotes
//! and converts it into a [`PatternNode`] literal tree. Single-node
//! metavariables sitting in a slot whose role expects a syntactic kind are
//! wrapped in the matching role adapter.

use std::collections::{HashMap, HashSet};
use std::fmt;

use heddle_pattern::{Literal, Pattern, PatternNode};
use heddle_tree::{Role, SyntaxNode};
use tracing::debug;

use crate::error::SyntaxError;
use crate::language::SupportedLanguage;
use crate::metavariables::{
    MetaVarKind, MetaVariable, WILDCARD, metavar_from_placeholder, normalise,
};
use crate::node::{SourceNode, holds_statements};
use crate::parser::{ParseResult, Parser};

const TEMPLATE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::template");

/// A compiled text template.
#[derive(Debug)]
pub struct Template {
    source: String,
    language: SupportedLanguage,
    metavariables: Vec<MetaVariable>,
    pattern: Pattern,
}

impl Template {
    /// Compiles `source` as a template in `language`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - a metavariable is malformed, or a `$$$` name is reused
    /// - the template is not valid code even inside a function body
    /// - the template denotes no node or several sibling nodes
    ///
    /// # Examples
    ///
    /// ```
    /// use heddle_syntax::{SupportedLanguage, Template};
    ///
    /// let template = Template::compile("$FUNC($ARG)", SupportedLanguage::Rust)?;
    /// assert_eq!(template.metavariables().len(), 2);
    /// # Ok::<(), heddle_syntax::SyntaxError>(())
    /// ```
    pub fn compile(source: &str, language: SupportedLanguage) -> Result<Self, SyntaxError> {
        let normalised = normalise(source)?;
        check_metavariable_usage(&normalised.metavariables)?;

        let mut parser = Parser::new(language)?;
        let mut parsed = parser.parse(&normalised.text)?;
        let mut wrapped = false;
        if parsed.has_errors() {
            parsed = parser.parse(&language.wrap_fragment(&normalised.text))?;
            wrapped = true;
        }
        if parsed.has_errors() {
            return Err(SyntaxError::invalid_template(
                language,
                "template contains syntax errors",
            ));
        }

        let root = locate_root(&parsed, wrapped).ok_or_else(|| {
            SyntaxError::invalid_template(language, "template must denote exactly one node")
        })?;
        let pattern = Pattern::compile(Converter::default().convert(root, &Role::ROOT))?;

        debug!(
            target: TEMPLATE_TARGET,
            %language,
            wrapped,
            root = root.node().kind(),
            metavariables = normalised.metavariables.len(),
            "compiled template"
        );

        Ok(Self {
            source: source.to_owned(),
            language,
            metavariables: normalised.metavariables,
            pattern,
        })
    }

    /// Returns the template text as written.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the language the template was compiled for.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Returns every metavariable occurrence in source order.
    #[must_use]
    pub fn metavariables(&self) -> &[MetaVariable] {
        &self.metavariables
    }

    /// Returns whether the template contains any metavariables.
    #[must_use]
    pub fn has_metavariables(&self) -> bool {
        !self.metavariables.is_empty()
    }

    /// Returns the kind of the named, non-wildcard metavariable `name`.
    #[must_use]
    pub fn metavariable_kind(&self, name: &str) -> Option<MetaVarKind> {
        self.metavariables
            .iter()
            .find(|metavariable| metavariable.name == name && !metavariable.is_wildcard())
            .map(|metavariable| metavariable.kind)
    }

    /// Returns the compiled structural pattern.
    #[must_use]
    pub const fn pattern(&self) -> &Pattern {
        &self.pattern
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.pattern, f)
    }
}

fn check_metavariable_usage(metavariables: &[MetaVariable]) -> Result<(), SyntaxError> {
    let mut usage: HashMap<&str, (usize, bool)> = HashMap::new();
    for metavariable in metavariables.iter().filter(|m| !m.is_wildcard()) {
        let entry = usage.entry(metavariable.name.as_str()).or_default();
        entry.0 += 1;
        entry.1 |= metavariable.kind == MetaVarKind::Multiple;
    }

    let mut offenders: Vec<_> = usage
        .into_iter()
        .filter(|(_, (count, multiple))| *multiple && *count > 1)
        .map(|(name, _)| name)
        .collect();
    offenders.sort_unstable();
    match offenders.first() {
        Some(name) => Err(SyntaxError::invalid_metavariable(format!(
            "${name} binds a run of nodes and may appear only once"
        ))),
        None => Ok(()),
    }
}

/// Finds the node a parsed template denotes.
fn locate_root(parsed: &ParseResult, wrapped: bool) -> Option<SourceNode<'_>> {
    let file = parsed.root_node();
    let mut node = if wrapped {
        let function = sole_named_child(file)?;
        function.child_by_field_name("body")?
    } else {
        file
    };

    // Peel the file or body and any statement that only terminates an
    // expression.
    node = sole_named_child(node)?;
    while is_terminated_expression(node) {
        node = sole_named_child(node)?;
    }
    Some(SourceNode::new(node, parsed.source()))
}

fn sole_named_child(node: tree_sitter::Node<'_>) -> Option<tree_sitter::Node<'_>> {
    let mut cursor = node.walk();
    let mut named = node
        .named_children(&mut cursor)
        .filter(|child| !child.is_extra());
    let only = named.next()?;
    named.next().is_none().then_some(only)
}

/// Returns whether `node` wraps one named child and otherwise holds only
/// statement terminators.
fn is_terminated_expression(node: tree_sitter::Node<'_>) -> bool {
    if node.is_error() || !node.is_named() || holds_statements(node.kind()) {
        return false;
    }
    let mut cursor = node.walk();
    let mut named = 0_usize;
    for child in node.children(&mut cursor).filter(|child| !child.is_extra()) {
        if child.is_named() {
            named += 1;
        } else if child.kind() != ";" {
            return false;
        }
    }
    named == 1
}

/// Finds the metavariable a template node stands for, looking through
/// terminated-expression wrappers.
fn metavariable_in<'a>(node: SourceNode<'a>) -> Option<(&'a str, MetaVarKind)> {
    if let Some(found) = node.leaf_text().and_then(metavar_from_placeholder) {
        return Some(found);
    }
    let inner = node.node();
    if !is_terminated_expression(inner) {
        return None;
    }
    let child = sole_named_child(inner)?;
    metavariable_in(node.at(child))
}

#[derive(Default)]
struct Converter {
    bound: HashSet<String>,
}

impl Converter {
    fn convert(&mut self, node: SourceNode<'_>, slot: &Role) -> PatternNode {
        if let Some((name, kind)) = metavariable_in(node) {
            return self.metavariable(name, kind, slot);
        }

        let mut literal = Literal::new(node.kind());
        if let Some(text) = node.leaf_text() {
            literal = literal.text(text);
        }
        for child in node.children() {
            let pattern = self.convert(child.node, &child.role);
            literal = literal.child(child.role, pattern);
        }
        literal.into()
    }

    fn metavariable(&mut self, name: &str, kind: MetaVarKind, slot: &Role) -> PatternNode {
        match kind {
            MetaVarKind::Single => {
                let single = if name == WILDCARD {
                    PatternNode::any()
                } else if self.bound.insert(name.to_owned()) {
                    PatternNode::any_named(name)
                } else {
                    PatternNode::backreference(name)
                };
                match slot.kind() {
                    Some(role_kind) => PatternNode::embed(role_kind, single),
                    None => single,
                }
            }
            MetaVarKind::Multiple => {
                let run = PatternNode::zero_or_more(PatternNode::any());
                if name == WILDCARD {
                    run
                } else {
                    self.bound.insert(name.to_owned());
                    PatternNode::capture(name, run)
                }
            }
        }
    }
}
