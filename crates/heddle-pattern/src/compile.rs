//! Pattern compilation.
//!
//! Compilation checks structural well-formedness once, so the matcher never
//! has to treat a malformed pattern as a runtime condition. A compiled
//! [`Pattern`] is immutable and may be shared across threads and matched
//! against any number of targets.

use heddle_tree::Role;

use crate::error::PatternError;
use crate::node::PatternNode;

/// A validated, immutable pattern.
///
/// A pattern is a sequence of elements matched against a sequence of
/// top-level siblings; [`Pattern::compile`] builds the common one-element
/// case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    elements: Vec<PatternNode>,
    captures: Vec<String>,
}

impl Pattern {
    /// Compiles a single-element pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is malformed; see
    /// [`Pattern::compile_sequence`].
    pub fn compile(root: PatternNode) -> Result<Self, PatternError> {
        Self::compile_sequence([root])
    }

    /// Compiles a pattern matched against a whole sibling sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if a choice has no alternatives, a name is empty, a
    /// repeat has `min > max`, a back-reference names a capture that cannot
    /// have been declared before it, or a role adapter occupies a slot that
    /// expects a different role.
    pub fn compile_sequence(
        nodes: impl IntoIterator<Item = PatternNode>,
    ) -> Result<Self, PatternError> {
        let elements: Vec<PatternNode> = nodes.into_iter().collect();
        let mut validator = Validator::default();
        for element in &elements {
            validator.visit(element, None)?;
        }

        Ok(Self {
            elements,
            captures: validator.declared,
        })
    }

    /// Returns the top-level elements.
    #[must_use]
    pub fn elements(&self) -> &[PatternNode] {
        &self.elements
    }

    /// Returns every capture name the pattern can bind, in declaration
    /// order.
    #[must_use]
    pub fn capture_names(&self) -> &[String] {
        &self.captures
    }
}

/// Pre-order walk tracking which names may already be bound.
///
/// Matching proceeds depth-first, left to right, binding a capture only
/// after its inner pattern succeeded, so the walk declares names in the same
/// order.
#[derive(Default)]
struct Validator {
    declared: Vec<String>,
}

impl Validator {
    fn visit(&mut self, node: &PatternNode, slot: Option<&Role>) -> Result<(), PatternError> {
        match node {
            PatternNode::Any(None) => Ok(()),
            PatternNode::Any(Some(name)) => self.declare(name),
            PatternNode::Capture(capture) => {
                self.visit(&capture.inner, slot)?;
                self.declare(&capture.name)
            }
            PatternNode::Optional(inner) => self.visit(inner, slot),
            PatternNode::Repeat(repeat) => {
                if let Some(max) = repeat.max
                    && repeat.min > max
                {
                    return Err(PatternError::invalid_repeat_bounds(repeat.min, max));
                }
                self.visit(&repeat.inner, slot)
            }
            PatternNode::Choice(alternatives) => self.visit_alternatives(alternatives, slot),
            PatternNode::Backreference(name) => {
                if name.is_empty() {
                    return Err(PatternError::EmptyCaptureName);
                }
                if self.declared.contains(name) {
                    Ok(())
                } else {
                    Err(PatternError::undeclared_backreference(name))
                }
            }
            PatternNode::Literal(literal) => literal
                .children
                .iter()
                .try_for_each(|child| self.visit(&child.pattern, Some(&child.role))),
            PatternNode::Role(adapter) => {
                if let Some(role) = slot
                    && let Some(expected) = role.kind()
                    && expected != adapter.kind
                {
                    return Err(PatternError::role_mismatch(
                        role.name(),
                        expected,
                        adapter.kind,
                    ));
                }
                self.visit(&adapter.pattern, slot)
            }
        }
    }

    /// Alternatives are mutually exclusive: names declared by one are not
    /// visible inside another, but all of them may be bound afterwards.
    fn visit_alternatives(
        &mut self,
        alternatives: &[PatternNode],
        slot: Option<&Role>,
    ) -> Result<(), PatternError> {
        if alternatives.is_empty() {
            return Err(PatternError::EmptyChoice);
        }

        let before = self.declared.clone();
        let mut union = before.clone();
        for alternative in alternatives {
            self.declared.clone_from(&before);
            self.visit(alternative, slot)?;
            for name in &self.declared {
                if !union.contains(name) {
                    union.push(name.clone());
                }
            }
        }
        self.declared = union;
        Ok(())
    }

    fn declare(&mut self, name: &str) -> Result<(), PatternError> {
        if name.is_empty() {
            return Err(PatternError::EmptyCaptureName);
        }
        if !self.declared.iter().any(|known| known == name) {
            self.declared.push(name.to_owned());
        }
        Ok(())
    }
}
