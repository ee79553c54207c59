//! The pattern vocabulary.
//!
//! A pattern is a tree of [`PatternNode`]s. Literal nodes mirror the shape
//! of the AST being searched; the remaining variants are matchers that may
//! appear at any child position of a literal:
//!
//! | Variant | Consumes | Binds |
//! |---------|----------|-------|
//! | [`Any`](PatternNode::Any) | one sibling | optionally that sibling |
//! | [`Capture`](PatternNode::Capture) | whatever the inner pattern consumes | all of it |
//! | [`Optional`](PatternNode::Optional) | the inner pattern once, or nothing | inner bindings |
//! | [`Repeat`](PatternNode::Repeat) | the inner pattern `min..=max` times | per iteration |
//! | [`Choice`](PatternNode::Choice) | one alternative | that alternative's bindings |
//! | [`Backreference`](PatternNode::Backreference) | one sibling equal to a capture | nothing |
//! | [`Literal`](PatternNode::Literal) | one node of the given kind | child bindings |
//! | [`Role`](PatternNode::Role) | whatever the wrapped pattern consumes | wrapped bindings |

use heddle_tree::{Role, SyntaxNode};

use crate::adapter::RoleAdapter;

/// A node in a pattern tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternNode {
    /// Matches exactly one sibling of any kind, binding it when named.
    Any(Option<String>),
    /// Binds a name to the siblings consumed by the inner pattern.
    Capture(NamedCapture),
    /// Matches the inner pattern once, or consumes nothing.
    Optional(Box<PatternNode>),
    /// Matches the inner pattern over consecutive siblings.
    Repeat(Repeat),
    /// Tries each alternative in declaration order.
    Choice(Vec<PatternNode>),
    /// Matches one sibling content-equal to everything bound to the name.
    Backreference(String),
    /// Matches a node of a given kind whose children match child patterns.
    Literal(Literal),
    /// Presents the wrapped pattern under a syntactic role.
    Role(RoleAdapter),
}

impl PatternNode {
    /// A wildcard matching one sibling without binding it.
    #[must_use]
    pub const fn any() -> Self {
        Self::Any(None)
    }

    /// A wildcard matching one sibling and binding it to `name`.
    #[must_use]
    pub fn any_named(name: impl Into<String>) -> Self {
        Self::Any(Some(name.into()))
    }

    /// Binds `name` to the siblings `inner` consumes.
    #[must_use]
    pub fn capture(name: impl Into<String>, inner: Self) -> Self {
        Self::Capture(NamedCapture {
            name: name.into(),
            inner: Box::new(inner),
        })
    }

    /// Matches `inner` once, preferring that to matching nothing.
    #[must_use]
    pub fn optional(inner: Self) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// Matches `inner` between `min` and `max` times, greedily.
    ///
    /// A `max` of `None` leaves the repetition unbounded.
    #[must_use]
    pub fn repeat(inner: Self, min: usize, max: Option<usize>) -> Self {
        Self::Repeat(Repeat {
            inner: Box::new(inner),
            min,
            max,
        })
    }

    /// Matches `inner` any number of times, including zero.
    #[must_use]
    pub fn zero_or_more(inner: Self) -> Self {
        Self::repeat(inner, 0, None)
    }

    /// Matches `inner` at least once.
    #[must_use]
    pub fn one_or_more(inner: Self) -> Self {
        Self::repeat(inner, 1, None)
    }

    /// Tries `alternatives` in order.
    #[must_use]
    pub fn choice(alternatives: impl IntoIterator<Item = Self>) -> Self {
        Self::Choice(alternatives.into_iter().collect())
    }

    /// Matches a sibling equal to the nodes already bound to `name`.
    #[must_use]
    pub fn backreference(name: impl Into<String>) -> Self {
        Self::Backreference(name.into())
    }

    /// Starts a literal template for a node of `kind`.
    #[must_use]
    pub fn literal(kind: impl Into<String>) -> Literal {
        Literal::new(kind)
    }

    /// A literal leaf of `kind` whose content must equal `text`.
    #[must_use]
    pub fn leaf(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Literal(Literal::new(kind).text(text))
    }

    /// Converts a concrete subtree into an all-literal template that matches
    /// exactly that shape and content.
    #[must_use]
    pub fn from_node<N: SyntaxNode>(node: &N) -> Self {
        let mut literal = Literal::new(node.kind());
        literal.text = node.text().map(ToOwned::to_owned);
        literal.children = node
            .children()
            .iter()
            .map(|child| Slot::new(child.role.clone(), Self::from_node(&child.node)))
            .collect();
        Self::Literal(literal)
    }
}

impl From<Literal> for PatternNode {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

impl From<RoleAdapter> for PatternNode {
    fn from(adapter: RoleAdapter) -> Self {
        Self::Role(adapter)
    }
}

/// A capture wrapping an inner pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedCapture {
    pub(crate) name: String,
    pub(crate) inner: Box<PatternNode>,
}

impl NamedCapture {
    /// Returns the capture name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the wrapped pattern.
    #[must_use]
    pub fn inner(&self) -> &PatternNode {
        &self.inner
    }
}

/// A bounded or unbounded repetition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repeat {
    pub(crate) inner: Box<PatternNode>,
    pub(crate) min: usize,
    pub(crate) max: Option<usize>,
}

impl Repeat {
    /// Returns the repeated pattern.
    #[must_use]
    pub fn inner(&self) -> &PatternNode {
        &self.inner
    }

    /// Returns the minimum iteration count.
    #[must_use]
    pub const fn min(&self) -> usize {
        self.min
    }

    /// Returns the maximum iteration count, if bounded.
    #[must_use]
    pub const fn max(&self) -> Option<usize> {
        self.max
    }

    pub(crate) fn allows_more(&self, count: usize) -> bool {
        self.max.is_none_or(|max| count < max)
    }
}

/// A literal template for one node.
///
/// Built with [`PatternNode::literal`]:
///
/// ```
/// use heddle_pattern::PatternNode;
/// use heddle_tree::Role;
///
/// let call: PatternNode = PatternNode::literal("call_expression")
///     .child(Role::new("function"), PatternNode::leaf("identifier", "drop"))
///     .child(Role::new("arguments"), PatternNode::any_named("ARGS"))
///     .into();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub(crate) kind: String,
    pub(crate) text: Option<String>,
    pub(crate) children: Vec<Slot>,
}

impl Literal {
    /// Starts a literal for a node of `kind` with no children.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Requires the target's leaf content to equal `text`, as judged by
    /// [`heddle_tree::SyntaxNode::text_eq`].
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Appends a child position under `role`.
    #[must_use]
    pub fn child(mut self, role: Role, pattern: impl Into<PatternNode>) -> Self {
        self.children.push(Slot::new(role, pattern.into()));
        self
    }

    /// Returns the required node kind.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the required leaf content, if any.
    #[must_use]
    pub fn leaf_text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Returns the child positions in order.
    #[must_use]
    pub fn children(&self) -> &[Slot] {
        &self.children
    }
}

/// A child position of a literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub(crate) role: Role,
    pub(crate) pattern: PatternNode,
}

impl Slot {
    /// Creates a child position.
    #[must_use]
    pub const fn new(role: Role, pattern: PatternNode) -> Self {
        Self { role, pattern }
    }

    /// Returns the role every consumed target child must occupy.
    #[must_use]
    pub const fn role(&self) -> &Role {
        &self.role
    }

    /// Returns the pattern for this position.
    #[must_use]
    pub const fn pattern(&self) -> &PatternNode {
        &self.pattern
    }
}
