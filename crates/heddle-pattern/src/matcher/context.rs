//! Per-invocation backtracking state.
//!
//! The context owns an append-only capture log and a cursor into the sibling
//! sequence currently being consumed. A [`Checkpoint`] records both; rolling
//! back truncates the log and resets the cursor, so no per-entry undo is
//! needed.

use std::collections::BTreeMap;
use std::rc::Rc;

use heddle_tree::{Child, SyntaxNode};

/// One level of target siblings plus the position to resume from in the
/// enclosing level.
#[derive(Debug)]
struct Frame<N> {
    siblings: Vec<Child<N>>,
    parent: Option<Cursor<N>>,
}

/// A position within a sibling sequence of the target tree.
///
/// Frames are shared, so cloning a cursor is O(1).
#[derive(Debug)]
pub(super) struct Cursor<N> {
    frame: Rc<Frame<N>>,
    index: usize,
}

impl<N> Clone for Cursor<N> {
    fn clone(&self) -> Self {
        Self {
            frame: Rc::clone(&self.frame),
            index: self.index,
        }
    }
}

impl<N: SyntaxNode> Cursor<N> {
    /// A cursor at the start of a top-level sequence.
    pub(super) fn root(siblings: Vec<Child<N>>) -> Self {
        Self {
            frame: Rc::new(Frame {
                siblings,
                parent: None,
            }),
            index: 0,
        }
    }

    pub(super) const fn index(&self) -> usize {
        self.index
    }

    /// Returns the sibling under the cursor, or `None` at the end.
    pub(super) fn current(&self) -> Option<&Child<N>> {
        self.frame.siblings.get(self.index)
    }

    pub(super) fn at_end(&self) -> bool {
        self.index >= self.frame.siblings.len()
    }

    /// Returns the siblings between `start` and the cursor.
    pub(super) fn consumed_since(&self, start: usize) -> &[Child<N>] {
        self.frame.siblings.get(start..self.index).unwrap_or_default()
    }

    fn advanced(&self) -> Self {
        Self {
            frame: Rc::clone(&self.frame),
            index: self.index + 1,
        }
    }

    /// Enters the children of the node under the cursor.
    fn descend(&self, children: Vec<Child<N>>) -> Self {
        Self {
            frame: Rc::new(Frame {
                siblings: children,
                parent: Some(self.clone()),
            }),
            index: 0,
        }
    }

    /// Leaves the current level, stepping past the node that was entered.
    fn ascend(&self) -> Option<Self> {
        self.frame.parent.as_ref().map(Self::advanced)
    }
}

/// A saved `(log length, cursor)` pair.
#[derive(Debug)]
pub(super) struct Checkpoint<N> {
    log_len: usize,
    cursor: Cursor<N>,
}

#[derive(Debug)]
struct CaptureEntry<'p, N> {
    name: &'p str,
    /// `None` records that the name was bound to an empty sequence.
    node: Option<N>,
}

/// Mutable state for one top-level match invocation.
#[derive(Debug)]
pub(super) struct MatchContext<'p, N> {
    log: Vec<CaptureEntry<'p, N>>,
    cursor: Cursor<N>,
}

impl<'p, N: SyntaxNode> MatchContext<'p, N> {
    pub(super) const fn new(cursor: Cursor<N>) -> Self {
        Self {
            log: Vec::new(),
            cursor,
        }
    }

    pub(super) const fn cursor(&self) -> &Cursor<N> {
        &self.cursor
    }

    pub(super) fn checkpoint(&self) -> Checkpoint<N> {
        Checkpoint {
            log_len: self.log.len(),
            cursor: self.cursor.clone(),
        }
    }

    pub(super) fn rollback(&mut self, checkpoint: &Checkpoint<N>) {
        self.log.truncate(checkpoint.log_len);
        self.cursor = checkpoint.cursor.clone();
    }

    pub(super) fn advance(&mut self) {
        self.cursor = self.cursor.advanced();
    }

    /// Enters the children of the node under the cursor.
    pub(super) fn descend(&mut self, children: Vec<Child<N>>) {
        self.cursor = self.cursor.descend(children);
    }

    /// Returns to the enclosing level if every sibling here was consumed.
    pub(super) fn ascend(&mut self) -> bool {
        if !self.cursor.at_end() {
            return false;
        }
        match self.cursor.ascend() {
            Some(parent) => {
                self.cursor = parent;
                true
            }
            None => false,
        }
    }

    pub(super) fn bind(&mut self, name: &'p str, node: N) {
        self.log.push(CaptureEntry {
            name,
            node: Some(node),
        });
    }

    /// Binds `name` to every sibling consumed since `start`.
    pub(super) fn bind_since(&mut self, name: &'p str, start: usize) {
        let consumed = self.cursor.consumed_since(start);
        if consumed.is_empty() {
            self.log.push(CaptureEntry { name, node: None });
            return;
        }
        self.log.extend(consumed.iter().map(|child| CaptureEntry {
            name,
            node: Some(child.node.clone()),
        }));
    }

    /// Returns the nodes bound to `name` in the current branch.
    pub(super) fn bound(&self, name: &str) -> impl Iterator<Item = &N> {
        self.log
            .iter()
            .filter(move |entry| entry.name == name)
            .filter_map(|entry| entry.node.as_ref())
    }

    /// Copies the current bindings out of the log.
    pub(super) fn snapshot(&self) -> BTreeMap<String, Vec<N>> {
        let mut captures: BTreeMap<String, Vec<N>> = BTreeMap::new();
        for entry in &self.log {
            let nodes = captures.entry(entry.name.to_owned()).or_default();
            if let Some(node) = &entry.node {
                nodes.push(node.clone());
            }
        }
        captures
    }
}
