//! Whole-tree search with compiled templates.
//!
//! The tree is walked in pre-order. At each named node the template's pattern
//! is tried with the node as the whole top-level sequence, and the first
//! result in preference order is reported. Walking stops once
//! [`SearchConfig::max_matches`] results have been collected.

use std::collections::BTreeMap;
use std::ops::Range;

use heddle_pattern::Match;
use tracing::debug;

use crate::config::SearchConfig;
use crate::metavariables::MetaVarKind;
use crate::node::{SourceNode, pre_order};
use crate::parser::ParseResult;
use crate::position::Position;
use crate::template::Template;

const SEARCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::search");

/// A single captured node.
#[derive(Debug, Clone)]
pub struct CapturedNode<'a> {
    node: SourceNode<'a>,
}

impl<'a> CapturedNode<'a> {
    /// Returns the captured node.
    #[must_use]
    pub const fn node(&self) -> SourceNode<'a> {
        self.node
    }

    /// Returns the source text of the captured node.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.node.source_text()
    }

    /// Returns the byte range of the captured node.
    #[must_use]
    pub fn byte_range(&self) -> Range<usize> {
        self.node.byte_range()
    }
}

/// The run of siblings captured by a `$$$NAME` metavariable.
#[derive(Debug, Clone)]
pub struct CapturedNodes<'a> {
    nodes: Vec<CapturedNode<'a>>,
    text: &'a str,
    byte_range: Range<usize>,
}

impl<'a> CapturedNodes<'a> {
    fn new(nodes: &[SourceNode<'a>], source: &'a str) -> Self {
        let byte_range = match (nodes.first(), nodes.last()) {
            (Some(first), Some(last)) => first.byte_range().start..last.byte_range().end,
            _ => 0..0,
        };
        Self {
            nodes: nodes.iter().map(|&node| CapturedNode { node }).collect(),
            text: source.get(byte_range.clone()).unwrap_or_default(),
            byte_range,
        }
    }

    /// Returns the captured nodes in order.
    #[must_use]
    pub fn nodes(&self) -> &[CapturedNode<'a>] {
        &self.nodes
    }

    /// Returns the source text from the first captured node to the last,
    /// including whatever separates them.
    #[must_use]
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// Returns the byte range covered by the capture, `0..0` when empty.
    #[must_use]
    pub fn byte_range(&self) -> Range<usize> {
        self.byte_range.clone()
    }

    /// Returns whether the run is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A captured metavariable value.
#[derive(Debug, Clone)]
pub enum CapturedValue<'a> {
    /// A single-node capture (`$NAME`).
    Single(CapturedNode<'a>),
    /// A multi-node capture (`$$$NAME`).
    Multiple(CapturedNodes<'a>),
}

impl<'a> CapturedValue<'a> {
    /// Returns the captured text.
    #[must_use]
    pub fn text(&self) -> &'a str {
        match self {
            Self::Single(node) => node.text(),
            Self::Multiple(nodes) => nodes.text(),
        }
    }

    /// Returns the byte range of the capture.
    #[must_use]
    pub fn byte_range(&self) -> Range<usize> {
        match self {
            Self::Single(node) => node.byte_range(),
            Self::Multiple(nodes) => nodes.byte_range(),
        }
    }

    /// Returns the capture as a single node, if applicable.
    #[must_use]
    pub const fn as_single(&self) -> Option<&CapturedNode<'a>> {
        match self {
            Self::Single(node) => Some(node),
            Self::Multiple(_) => None,
        }
    }

    /// Returns the capture as multiple nodes, if applicable.
    #[must_use]
    pub const fn as_multiple(&self) -> Option<&CapturedNodes<'a>> {
        match self {
            Self::Multiple(nodes) => Some(nodes),
            Self::Single(_) => None,
        }
    }
}

/// A node matched by a template, with its captures.
#[derive(Debug)]
pub struct SearchMatch<'a> {
    node: SourceNode<'a>,
    captures: BTreeMap<String, CapturedValue<'a>>,
}

impl<'a> SearchMatch<'a> {
    fn new(
        node: SourceNode<'a>,
        found: Match<SourceNode<'a>>,
        template: &Template,
        source: &'a str,
    ) -> Self {
        let captures = found
            .into_captures()
            .into_iter()
            .filter_map(|(name, nodes)| {
                let value = match template.metavariable_kind(&name)? {
                    MetaVarKind::Single => CapturedValue::Single(CapturedNode {
                        node: *nodes.first()?,
                    }),
                    MetaVarKind::Multiple => {
                        CapturedValue::Multiple(CapturedNodes::new(&nodes, source))
                    }
                };
                Some((name, value))
            })
            .collect();
        Self { node, captures }
    }

    /// Returns the matched node.
    #[must_use]
    pub const fn node(&self) -> SourceNode<'a> {
        self.node
    }

    /// Returns the byte range of the match.
    #[must_use]
    pub fn byte_range(&self) -> Range<usize> {
        self.node.byte_range()
    }

    /// Returns the matched source text.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.node.source_text()
    }

    /// Returns where the match starts.
    #[must_use]
    pub fn start_position(&self) -> Position {
        self.node.start_position()
    }

    /// Returns where the match ends.
    #[must_use]
    pub fn end_position(&self) -> Position {
        self.node.end_position()
    }

    /// Returns the value captured for `name`.
    #[must_use]
    pub fn capture(&self, name: &str) -> Option<&CapturedValue<'a>> {
        self.captures.get(name)
    }

    /// Returns every capture in name order.
    #[must_use]
    pub const fn captures(&self) -> &BTreeMap<String, CapturedValue<'a>> {
        &self.captures
    }
}

impl Template {
    /// Finds every match in `parsed` under the default limits.
    #[must_use]
    pub fn find_all<'a>(&self, parsed: &'a ParseResult) -> Vec<SearchMatch<'a>> {
        self.find_all_with(parsed, &SearchConfig::default())
    }

    /// Finds matches in `parsed`, stopping after `config.max_matches`.
    #[must_use]
    pub fn find_all_with<'a>(
        &self,
        parsed: &'a ParseResult,
        config: &SearchConfig,
    ) -> Vec<SearchMatch<'a>> {
        let found: Vec<_> = self.search(parsed).take(config.max_matches).collect();
        debug!(
            target: SEARCH_TARGET,
            template = self.source(),
            matches = found.len(),
            limit = config.max_matches,
            "searched tree"
        );
        found
    }

    /// Finds the first match in pre-order.
    #[must_use]
    pub fn find_first<'a>(&self, parsed: &'a ParseResult) -> Option<SearchMatch<'a>> {
        self.search(parsed).next()
    }

    fn search<'a>(
        &self,
        parsed: &'a ParseResult,
    ) -> impl Iterator<Item = SearchMatch<'a>> {
        if parsed.language() != self.language() {
            debug!(
                target: SEARCH_TARGET,
                template = %self.language(),
                tree = %parsed.language(),
                "language mismatch; nothing can match"
            );
        }
        let source = parsed.source();
        let same_language = parsed.language() == self.language();
        pre_order(parsed.root_node())
            .filter(move |node| same_language && node.is_named() && !node.is_extra())
            .filter_map(move |node| {
                let candidate = SourceNode::new(node, source);
                let found = self.pattern().first_match(&candidate)?;
                Some(SearchMatch::new(candidate, found, self, source))
            })
    }
}
