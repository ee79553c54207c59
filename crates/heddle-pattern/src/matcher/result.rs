//! Match results.

use std::collections::BTreeMap;

/// An immutable snapshot of the bindings of one successful match.
///
/// Each capture name maps to the ordered target nodes bound to it. Names
/// bound inside a repetition accumulate one entry per iteration; a capture
/// whose inner pattern consumed nothing maps to an empty sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<N> {
    captures: BTreeMap<String, Vec<N>>,
}

impl<N> Match<N> {
    pub(crate) const fn new(captures: BTreeMap<String, Vec<N>>) -> Self {
        Self { captures }
    }

    /// Returns the nodes bound to `name`, or an empty slice when unbound.
    #[must_use]
    pub fn get(&self, name: &str) -> &[N] {
        self.captures.get(name).map_or(&[], Vec::as_slice)
    }

    /// Returns the node bound to `name` when exactly one is bound.
    #[must_use]
    pub fn single(&self, name: &str) -> Option<&N> {
        match self.get(name) {
            [node] => Some(node),
            _ => None,
        }
    }

    /// Returns whether `name` was bound, possibly to an empty sequence.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.captures.contains_key(name)
    }

    /// Returns the bound names in lexical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.captures.keys().map(String::as_str)
    }

    /// Returns every binding.
    #[must_use]
    pub const fn captures(&self) -> &BTreeMap<String, Vec<N>> {
        &self.captures
    }

    /// Consumes the match, returning its bindings.
    #[must_use]
    pub fn into_captures(self) -> BTreeMap<String, Vec<N>> {
        self.captures
    }

    /// Returns the number of bound names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.captures.len()
    }

    /// Returns whether the match bound no names.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }
}
