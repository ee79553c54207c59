//! Arena-backed syntax trees.
//!
//! Trees are assembled bottom-up with a [`TreeBuilder`], the same way a
//! parser reduces productions, and are immutable once finished. Nodes are
//! addressed by [`NodeId`] and read through [`NodeRef`] handles, which carry
//! the parent links the engine uses for navigation.

use std::fmt;

use crate::error::TreeError;
use crate::node::{Child, SyntaxNode};
use crate::role::Role;

/// Index of a node inside its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the raw arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: String,
    text: Option<String>,
    role: Role,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Incrementally assembles a [`Tree`] from leaves upwards.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<NodeData>,
}

impl TreeBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Adds a leaf node carrying `text` as its content.
    pub fn leaf(&mut self, kind: impl Into<String>, text: impl Into<String>) -> NodeId {
        self.push(kind.into(), Some(text.into()), Vec::new())
    }

    /// Adds an interior node adopting `children` in the given order.
    ///
    /// # Errors
    ///
    /// Returns an error if a child id was not produced by this builder or if
    /// a child already has a parent (including appearing twice in
    /// `children`). The builder is left unchanged on error.
    pub fn node<I>(&mut self, kind: impl Into<String>, children: I) -> Result<NodeId, TreeError>
    where
        I: IntoIterator<Item = (Role, NodeId)>,
    {
        let slots: Vec<(Role, NodeId)> = children.into_iter().collect();
        let mut adopted: Vec<NodeId> = Vec::with_capacity(slots.len());
        for (_, id) in &slots {
            let data = self.nodes.get(id.0).ok_or(TreeError::UnknownNode { id: *id })?;
            if data.parent.is_some() || adopted.contains(id) {
                return Err(TreeError::AlreadyAttached { id: *id });
            }
            adopted.push(*id);
        }

        let parent = NodeId(self.nodes.len());
        for (role, id) in slots {
            if let Some(data) = self.nodes.get_mut(id.0) {
                data.parent = Some(parent);
                data.role = role;
            }
        }

        Ok(self.push(kind.into(), None, adopted))
    }

    /// Finishes the tree rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is unknown or has been adopted by another
    /// node.
    pub fn finish(self, root: NodeId) -> Result<Tree, TreeError> {
        let data = self.nodes.get(root.0).ok_or(TreeError::UnknownNode { id: root })?;
        if data.parent.is_some() {
            return Err(TreeError::NotARoot { id: root });
        }

        Ok(Tree {
            nodes: self.nodes,
            root,
        })
    }

    fn push(&mut self, kind: String, text: Option<String>, children: Vec<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            text,
            role: Role::ROOT,
            parent: None,
            children,
        });
        id
    }
}

/// An immutable syntax tree stored in an arena.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Tree {
    /// Returns the root node.
    #[must_use]
    #[expect(
        clippy::indexing_slicing,
        reason = "finish() verified the root index and the arena never shrinks"
    )]
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id: self.root,
            data: &self.nodes[self.root.0],
        }
    }

    /// Returns the node with the given id, if it belongs to this tree.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.nodes
            .get(id.0)
            .map(|data| NodeRef { tree: self, id, data })
    }

    /// Returns the number of nodes stored in the arena.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// A copyable handle to a node inside a [`Tree`].
#[derive(Clone, Copy)]
pub struct NodeRef<'t> {
    tree: &'t Tree,
    id: NodeId,
    data: &'t NodeData,
}

impl<'t> NodeRef<'t> {
    /// Returns the arena id of this node.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the role this node occupies in its parent.
    ///
    /// The root reports [`Role::ROOT`].
    #[must_use]
    pub const fn role(&self) -> &'t Role {
        &self.data.role
    }

    /// Returns the tree this node belongs to.
    #[must_use]
    pub const fn tree(&self) -> &'t Tree {
        self.tree
    }
}

impl SyntaxNode for NodeRef<'_> {
    fn kind(&self) -> &str {
        &self.data.kind
    }

    fn text(&self) -> Option<&str> {
        self.data.text.as_deref()
    }

    fn children(&self) -> Vec<Child<Self>> {
        self.data
            .children
            .iter()
            .filter_map(|id| self.tree.get(*id))
            .map(|child| Child::new(child.data.role.clone(), child))
            .collect()
    }

    fn parent(&self) -> Option<Self> {
        self.data.parent.and_then(|id| self.tree.get(id))
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("NodeRef");
        debug.field("id", &self.id).field("kind", &self.data.kind);
        if let Some(text) = &self.data.text {
            debug.field("text", text);
        }
        debug.finish()
    }
}
