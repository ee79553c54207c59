//! Child slot labels.
//!
//! Every child of a node sits under a named [`Role`]. A role may declare the
//! [`RoleKind`] it expects, which is what lets a pattern stand in for a type,
//! an expression, a statement, a block or a variable initialiser.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use strum::{Display, EnumString};

/// Syntactic roles a child slot may require of the node placed in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RoleKind {
    /// A type reference.
    Type,
    /// An expression.
    Expression,
    /// A statement.
    Statement,
    /// A block of statements.
    Block,
    /// The initialiser of a variable declaration.
    VariableInitializer,
}

/// A named child slot.
///
/// Roles compare and hash by name only; the expected [`RoleKind`] is a
/// property of the slot, not part of its identity.
#[derive(Debug, Clone)]
pub struct Role {
    name: Cow<'static, str>,
    kind: Option<RoleKind>,
}

impl Role {
    /// Label of the top-level sequence a match starts from.
    pub const ROOT: Self = Self::from_static("<root>", None);

    /// Label for children the grammar leaves unnamed.
    pub const CHILD: Self = Self::from_static("child", None);

    /// Creates a role with no expected kind.
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            kind: None,
        }
    }

    /// Creates a role from a static name, usable in constants.
    #[must_use]
    pub const fn from_static(name: &'static str, kind: Option<RoleKind>) -> Self {
        Self {
            name: Cow::Borrowed(name),
            kind,
        }
    }

    /// Returns this role declaring that its slot expects `kind`.
    #[must_use]
    pub fn expecting(mut self, kind: RoleKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Returns the role name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the kind this slot expects, if it declares one.
    #[must_use]
    pub const fn kind(&self) -> Option<RoleKind> {
        self.kind
    }

    /// Returns whether this is [`Role::ROOT`].
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.name == Self::ROOT.name
    }

    /// Returns whether a node for `kind` may be placed in this slot.
    ///
    /// Root positions accept every kind; labelled slots accept only the kind
    /// they declare.
    #[must_use]
    pub fn accepts(&self, kind: RoleKind) -> bool {
        self.is_root() || self.kind == Some(kind)
    }
}

impl PartialEq for Role {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Role {}

impl Hash for Role {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
