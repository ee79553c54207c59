//! Tree-sitter parsing wrapper.
//!
//! Tree-sitter is error-tolerant: a parse always yields a tree, possibly with
//! `ERROR` and missing nodes. [`ParseResult`] keeps the tree together with its
//! source so [`SourceNode`] handles can read leaf text.

use std::ops::Range;

use crate::error::SyntaxError;
use crate::language::SupportedLanguage;
use crate::node::{SourceNode, pre_order};
use crate::position::Position;

const ERROR_CONTEXT_LIMIT: usize = 50;
const ERROR_CONTEXT_KEEP: usize = 47;

/// A source file and the tree Tree-sitter built for it.
#[derive(Debug)]
pub struct ParseResult {
    tree: tree_sitter::Tree,
    source: String,
    language: SupportedLanguage,
}

impl ParseResult {
    /// The underlying Tree-sitter tree.
    #[must_use]
    pub const fn tree(&self) -> &tree_sitter::Tree {
        &self.tree
    }

    /// The text the tree was built from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Grammar the text was parsed with.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// The raw Tree-sitter root.
    #[must_use]
    pub fn root_node(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }

    /// The root wrapped for the pattern engine.
    #[must_use]
    pub fn root(&self) -> SourceNode<'_> {
        SourceNode::new(self.tree.root_node(), &self.source)
    }

    /// Whether the parser had to recover anywhere in the tree.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// Every `ERROR` and missing node, in source order.
    #[must_use]
    pub fn errors(&self) -> Vec<SyntaxErrorInfo> {
        pre_order(self.tree.root_node())
            .filter(|node| node.is_error() || node.is_missing())
            .map(|node| SyntaxErrorInfo::from_node(node, &self.source))
            .collect()
    }
}

/// One recovery point in a parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxErrorInfo {
    /// Bytes covered by the `ERROR` or missing node.
    pub byte_range: Range<usize>,
    /// One-based start of the node.
    pub position: Position,
    /// The covered text, shortened when long.
    pub context: String,
    /// `syntax error`, or `missing <kind>` for inserted nodes.
    pub message: String,
}

impl SyntaxErrorInfo {
    fn from_node(node: tree_sitter::Node<'_>, source: &str) -> Self {
        let byte_range = node.byte_range();
        let context = source
            .get(byte_range.clone())
            .map(|text| {
                if text.len() > ERROR_CONTEXT_LIMIT {
                    let truncated: String = text.chars().take(ERROR_CONTEXT_KEEP).collect();
                    format!("{truncated}...")
                } else {
                    text.to_owned()
                }
            })
            .unwrap_or_default();

        let message = if node.is_missing() {
            format!("missing {}", node.kind())
        } else {
            "syntax error".to_owned()
        };

        Self {
            byte_range,
            position: node.start_position().into(),
            context,
            message,
        }
    }
}

/// A reusable Tree-sitter parser bound to one grammar.
pub struct Parser {
    inner: tree_sitter::Parser,
    language: SupportedLanguage,
}

impl Parser {
    /// Creates a parser for `language`.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded, which indicates an
    /// ABI mismatch between the grammar and the Tree-sitter runtime.
    pub fn new(language: SupportedLanguage) -> Result<Self, SyntaxError> {
        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(&language.tree_sitter_language())
            .map_err(|err| SyntaxError::grammar(language, err.to_string()))?;
        Ok(Self { inner, language })
    }

    /// Grammar this parser was created with.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Parses `source`.
    ///
    /// Syntax errors do not fail the parse; check
    /// [`ParseResult::has_errors`].
    ///
    /// # Errors
    ///
    /// Returns an error if Tree-sitter produces no tree at all.
    pub fn parse(&mut self, source: &str) -> Result<ParseResult, SyntaxError> {
        let tree = self
            .inner
            .parse(source, None)
            .ok_or(SyntaxError::Parse {
                language: self.language,
            })?;

        Ok(ParseResult {
            tree,
            source: source.to_owned(),
            language: self.language,
        })
    }
}
