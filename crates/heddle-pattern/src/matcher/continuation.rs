//! The remaining work of a match attempt.
//!
//! A continuation is a persistent singly linked list of goals. Pushing shares
//! the tail, so a choice point can hold on to the continuation that was live
//! when it was created and resume it later without copying.

use std::rc::Rc;

use heddle_tree::{Role, RoleKind};

use crate::node::{PatternNode, Repeat};

/// One unit of pending work.
#[derive(Debug, Clone, Copy)]
pub(super) enum Goal<'p> {
    /// Match `node` at the cursor, in a slot labelled `role`.
    Match {
        node: &'p PatternNode,
        role: &'p Role,
    },
    /// Bind `name` to the siblings consumed since `start`.
    Bind { name: &'p str, start: usize },
    /// `count` iterations of `repeat` are done; the last began at
    /// `iteration_start`.
    Iterate {
        repeat: &'p Repeat,
        role: &'p Role,
        count: usize,
        iteration_start: Option<usize>,
    },
    /// Require every sibling consumed since `start` to sit in a slot that
    /// accepts `kind`.
    CheckRole { kind: RoleKind, start: usize },
    /// Require the current level to be exhausted and return to its parent.
    Ascend,
}

#[derive(Debug)]
struct Link<'p> {
    goal: Goal<'p>,
    next: Continuation<'p>,
}

#[derive(Debug, Clone, Default)]
pub(super) struct Continuation<'p>(Option<Rc<Link<'p>>>);

impl<'p> Continuation<'p> {
    /// Returns a continuation running `goal` before this one.
    pub(super) fn then(self, goal: Goal<'p>) -> Self {
        Self(Some(Rc::new(Link { goal, next: self })))
    }

    /// Splits off the first goal.
    pub(super) fn pop(&self) -> Option<(Goal<'p>, Self)> {
        self.0.as_ref().map(|link| (link.goal, link.next.clone()))
    }
}

// Unlinks iteratively so long continuations cannot exhaust the stack.
impl Drop for Continuation<'_> {
    fn drop(&mut self) {
        let mut next = self.0.take();
        while let Some(link) = next {
            next = Rc::try_unwrap(link)
                .ok()
                .and_then(|mut owned| owned.next.0.take());
        }
    }
}
