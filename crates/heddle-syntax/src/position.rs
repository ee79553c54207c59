//! Shared position conversion helpers.
//!
//! Tree-sitter positions are zero-based. For user-facing messages, we prefer
//! one-based line and column numbers.

use std::fmt;

/// A one-based line and column in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// One-based line number.
    pub line: u32,
    /// One-based column, counted in bytes.
    pub column: u32,
}

impl From<tree_sitter::Point> for Position {
    fn from(point: tree_sitter::Point) -> Self {
        // Line/column numbers will realistically never exceed u32::MAX.
        let line = u32::try_from(point.row.saturating_add(1)).unwrap_or(u32::MAX);
        let column = u32::try_from(point.column.saturating_add(1)).unwrap_or(u32::MAX);
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
