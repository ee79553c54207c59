//! The node contract shared by parsers and the pattern engine.

use crate::role::Role;

/// A child node together with the slot it occupies in its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Child<N> {
    /// The slot the child occupies.
    pub role: Role,
    /// The child node.
    pub node: N,
}

impl<N> Child<N> {
    /// Pairs a node with its role.
    #[must_use]
    pub const fn new(role: Role, node: N) -> Self {
        Self { role, node }
    }
}

/// A read-only view of one node in a parsed tree.
///
/// Implementations are cheap handles: cloning a node clones the handle, not
/// the subtree. Trees are immutable while any handle into them is alive.
pub trait SyntaxNode: Clone {
    /// Returns the kind tag used for dispatch and literal comparison.
    fn kind(&self) -> &str;

    /// Returns the content of a leaf node (an identifier, a literal, a
    /// token). Interior nodes return `None`.
    fn text(&self) -> Option<&str>;

    /// Returns the children in source order, each labelled with its role.
    fn children(&self) -> Vec<Child<Self>>;

    /// Returns the parent node, if this is not the root.
    fn parent(&self) -> Option<Self>;

    /// Returns whether this node's leaf content equals `text`.
    ///
    /// Literal patterns with fixed leaf text compare through this hook, so an
    /// implementation that normalises content in [`SyntaxNode::content_eq`]
    /// should normalise here too. The default compares [`SyntaxNode::text`].
    fn text_eq(&self, text: &str) -> bool {
        self.text() == Some(text)
    }

    /// Returns whether `other` has the same content as this node.
    ///
    /// The default compares whole subtrees with [`structurally_equal`].
    fn content_eq(&self, other: &Self) -> bool {
        structurally_equal(self, other)
    }
}

/// Compares two subtrees by kind, leaf text and children, role by role.
#[must_use]
pub fn structurally_equal<N: SyntaxNode>(left: &N, right: &N) -> bool {
    if left.kind() != right.kind() || left.text() != right.text() {
        return false;
    }

    let left_children = left.children();
    let right_children = right.children();
    left_children.len() == right_children.len()
        && left_children
            .iter()
            .zip(&right_children)
            .all(|(a, b)| a.role == b.role && structurally_equal(&a.node, &b.node))
}
