//! Tree abstraction consumed by the heddle pattern engine.
//!
//! Parsers hand the engine ordered, role-labelled trees. This crate defines
//! the contract those trees satisfy and ships a small arena implementation
//! for hand-built ASTs:
//!
//! - [`SyntaxNode`] - kind tag, leaf text, labelled children, parent
//!   navigation and content equality
//! - [`Role`] and [`RoleKind`] - the child slot labels and the syntactic
//!   roles a slot may expect
//! - [`Tree`], [`TreeBuilder`] and [`NodeRef`] - an immutable arena tree
//!
//! # Example
//!
//! ```
//! use heddle_tree::{Role, SyntaxNode, TreeBuilder};
//!
//! let mut builder = TreeBuilder::new();
//! let left = builder.leaf("identifier", "a");
//! let right = builder.leaf("identifier", "b");
//! let sum = builder.node(
//!     "binary_expression",
//!     [(Role::new("left"), left), (Role::new("right"), right)],
//! )?;
//! let tree = builder.finish(sum)?;
//!
//! let root = tree.root();
//! assert_eq!(root.kind(), "binary_expression");
//! assert_eq!(root.children().len(), 2);
//! # Ok::<(), heddle_tree::TreeError>(())
//! ```

mod arena;
mod error;
mod node;
mod role;

pub use arena::{NodeId, NodeRef, Tree, TreeBuilder};
pub use error::TreeError;
pub use node::{Child, SyntaxNode, structurally_equal};
pub use role::{Role, RoleKind};

#[cfg(test)]
mod tests;
