//! Errors raised while compiling patterns.
//!
//! Only malformed pattern construction is an error. A pattern that fails to
//! match simply produces no results.

use heddle_tree::RoleKind;
use thiserror::Error;

/// Structural defects detected by [`Pattern::compile`](crate::Pattern::compile).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PatternError {
    /// A choice was built without alternatives.
    #[error("choice has no alternatives")]
    EmptyChoice,

    /// A capture, wildcard or back-reference was given an empty name.
    #[error("capture names must not be empty")]
    EmptyCaptureName,

    /// A repeat's lower bound exceeds its upper bound.
    #[error("repeat bounds are inverted: min {min} exceeds max {max}")]
    InvalidRepeatBounds {
        /// The lower bound.
        min: usize,
        /// The upper bound.
        max: usize,
    },

    /// A back-reference names a capture that no earlier part of the pattern
    /// can declare.
    #[error("back-reference to undeclared capture '{name}'")]
    UndeclaredBackreference {
        /// The referenced name.
        name: String,
    },

    /// A role adapter sits in a literal slot that expects another kind.
    #[error("slot '{role}' expects {expected} but holds a {found} adapter")]
    RoleMismatch {
        /// The slot name.
        role: String,
        /// The kind the slot expects.
        expected: RoleKind,
        /// The kind the adapter presents.
        found: RoleKind,
    },
}

impl PatternError {
    /// Creates an inverted repeat bounds error.
    #[must_use]
    pub const fn invalid_repeat_bounds(min: usize, max: usize) -> Self {
        Self::InvalidRepeatBounds { min, max }
    }

    /// Creates an undeclared back-reference error.
    #[must_use]
    pub fn undeclared_backreference(name: impl Into<String>) -> Self {
        Self::UndeclaredBackreference { name: name.into() }
    }

    /// Creates a role mismatch error.
    #[must_use]
    pub fn role_mismatch(role: impl Into<String>, expected: RoleKind, found: RoleKind) -> Self {
        Self::RoleMismatch {
            role: role.into(),
            expected,
            found,
        }
    }
}
