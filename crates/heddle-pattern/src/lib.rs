//! Structural pattern matching over syntax trees.
//!
//! A pattern is a tree of [`PatternNode`]s: literal nodes mirroring the
//! shape of the code being searched, with wildcards, captures, optional and
//! repeated elements, alternation and back-references embedded at any child
//! position. Patterns are validated once by [`Pattern::compile`] and then
//! matched against any tree implementing [`heddle_tree::SyntaxNode`].
//!
//! Matching backtracks the way a regular expression engine does, generalised
//! to ordered sibling sequences at every level of the tree. Results are
//! produced lazily by the [`Matches`] iterator in preference order; callers
//! stop the search simply by dropping it.
//!
//! # Example
//!
//! ```
//! use heddle_pattern::{Pattern, PatternNode};
//! use heddle_tree::{Role, TreeBuilder};
//!
//! let mut builder = TreeBuilder::new();
//! let items: Vec<_> = ["a", "b", "c"]
//!     .into_iter()
//!     .map(|name| (Role::CHILD, builder.leaf("identifier", name)))
//!     .collect();
//! let list = builder.node("list", items)?;
//! let tree = builder.finish(list)?;
//!
//! let pattern = Pattern::compile_sequence([
//!     PatternNode::zero_or_more(PatternNode::any()),
//!     PatternNode::any_named("LAST"),
//! ])?;
//!
//! let found = pattern.matches_children(&tree.root()).next();
//! assert!(found.is_some_and(|m| m.single("LAST").is_some()));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod adapter;
mod compile;
mod error;
mod matcher;
mod node;
mod render;

pub use adapter::RoleAdapter;
pub use compile::Pattern;
pub use error::PatternError;
pub use matcher::{Match, Matches};
pub use node::{Literal, NamedCapture, PatternNode, Repeat, Slot};
pub use render::render;

#[cfg(test)]
mod tests;
