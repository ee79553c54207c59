//! Errors raised while assembling trees.

use thiserror::Error;

use crate::arena::NodeId;

/// Misuse of a [`TreeBuilder`](crate::TreeBuilder).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TreeError {
    /// The id was not produced by this builder.
    #[error("node {id} does not belong to this builder")]
    UnknownNode {
        /// The offending id.
        id: NodeId,
    },

    /// The node already has a parent.
    #[error("node {id} is already attached to a parent")]
    AlreadyAttached {
        /// The offending id.
        id: NodeId,
    },

    /// The requested root has been adopted by another node.
    #[error("node {id} has a parent and cannot be the root")]
    NotARoot {
        /// The offending id.
        id: NodeId,
    },
}
