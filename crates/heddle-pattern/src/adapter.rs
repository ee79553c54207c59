//! Role adapters.
//!
//! Templates are literal trees whose slots expect particular syntactic
//! roles. An adapter lets any pattern occupy such a slot. Adapters are always
//! created explicitly, either through one constructor per role or through the
//! generic [`PatternNode::embed`] factory.
//!
//! ```
//! use heddle_pattern::PatternNode;
//! use heddle_tree::{Role, RoleKind};
//!
//! let condition = Role::new("condition").expecting(RoleKind::Expression);
//! let template: PatternNode = PatternNode::literal("if_expression")
//!     .child(condition, PatternNode::any_named("COND").as_expression())
//!     .into();
//! ```

use std::sync::Arc;

use heddle_tree::RoleKind;

use crate::node::PatternNode;

/// A pattern presented under a syntactic role.
///
/// The adapter shares the wrapped pattern rather than copying it, so one
/// fragment may be embedded at several positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAdapter {
    pub(crate) kind: RoleKind,
    pub(crate) pattern: Arc<PatternNode>,
}

impl RoleAdapter {
    /// Wraps a shared pattern.
    #[must_use]
    pub const fn new(kind: RoleKind, pattern: Arc<PatternNode>) -> Self {
        Self { kind, pattern }
    }

    /// Returns the role this adapter presents.
    #[must_use]
    pub const fn kind(&self) -> RoleKind {
        self.kind
    }

    /// Returns the wrapped pattern.
    #[must_use]
    pub fn pattern(&self) -> &PatternNode {
        &self.pattern
    }

    /// Returns the shared handle to the wrapped pattern.
    #[must_use]
    pub const fn shared(&self) -> &Arc<PatternNode> {
        &self.pattern
    }
}

impl PatternNode {
    /// Embeds `pattern` at a position expecting `kind`.
    #[must_use]
    pub fn embed(kind: RoleKind, pattern: impl Into<Arc<Self>>) -> Self {
        Self::Role(RoleAdapter::new(kind, pattern.into()))
    }

    /// Presents this pattern as a type reference.
    #[must_use]
    pub fn as_type(self) -> Self {
        Self::embed(RoleKind::Type, self)
    }

    /// Presents this pattern as an expression.
    #[must_use]
    pub fn as_expression(self) -> Self {
        Self::embed(RoleKind::Expression, self)
    }

    /// Presents this pattern as a statement.
    #[must_use]
    pub fn as_statement(self) -> Self {
        Self::embed(RoleKind::Statement, self)
    }

    /// Presents this pattern as a block.
    #[must_use]
    pub fn as_block(self) -> Self {
        Self::embed(RoleKind::Block, self)
    }

    /// Presents this pattern as a variable initialiser.
    #[must_use]
    pub fn as_variable_initializer(self) -> Self {
        Self::embed(RoleKind::VariableInitializer, self)
    }
}
