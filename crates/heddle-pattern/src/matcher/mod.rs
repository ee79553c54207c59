//! The backtracking match driver.
//!
//! Matching is an explicit stack machine rather than recursion. The machine
//! holds the current [`Continuation`] (what must still succeed), a
//! [`MatchContext`] (captures and cursor) and a stack of choice points. Each
//! choice point pairs a [`Checkpoint`] with the continuation that was live
//! when it was created and the alternative still to try. A failure pops the
//! newest choice point, rolls the context back and resumes from there.
//!
//! Results are produced lazily by the [`Matches`] iterator: each call to
//! `next` runs the machine until the continuation is exhausted with every
//! top-level sibling consumed, yields a snapshot, and leaves the remaining
//! choice points untouched until the caller asks again.

mod context;
mod continuation;
mod result;

use heddle_tree::{Child, Role, SyntaxNode};
use tracing::{debug, trace};

use crate::compile::Pattern;
use crate::node::{Literal, PatternNode, Repeat};

use self::context::{Checkpoint, Cursor, MatchContext};
use self::continuation::{Continuation, Goal};
pub use self::result::Match;

const MATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::matcher");

/// Slot label for top-level elements.
static ROOT: Role = Role::ROOT;

impl Pattern {
    /// Matches against `node` as a one-element top-level sequence.
    #[must_use = "matches are computed lazily"]
    pub fn matches<N: SyntaxNode>(&self, node: &N) -> Matches<'_, N> {
        self.matches_sequence([node.clone()])
    }

    /// Matches against a sequence of top-level siblings.
    ///
    /// Every sibling must be consumed by the pattern's elements.
    #[must_use = "matches are computed lazily"]
    pub fn matches_sequence<N, I>(&self, nodes: I) -> Matches<'_, N>
    where
        N: SyntaxNode,
        I: IntoIterator<Item = N>,
    {
        let siblings = nodes
            .into_iter()
            .map(|node| Child::new(Role::ROOT, node))
            .collect();
        Matches::new(self, siblings)
    }

    /// Matches against the children of `parent`, keeping their roles.
    #[must_use = "matches are computed lazily"]
    pub fn matches_children<N: SyntaxNode>(&self, parent: &N) -> Matches<'_, N> {
        Matches::new(self, parent.children())
    }

    /// Returns whether the pattern matches `node` at least once.
    #[must_use]
    pub fn is_match<N: SyntaxNode>(&self, node: &N) -> bool {
        self.matches(node).next().is_some()
    }

    /// Returns the preferred match against `node`, if any.
    #[must_use]
    pub fn first_match<N: SyntaxNode>(&self, node: &N) -> Option<Match<N>> {
        self.matches(node).next()
    }
}

/// What a choice point resumes with.
#[derive(Debug)]
enum Alternative<'p> {
    /// Run the saved continuation as is.
    Resume,
    /// Try the first of `alternatives`, then the saved continuation.
    Choice {
        alternatives: &'p [PatternNode],
        role: &'p Role,
    },
}

#[derive(Debug)]
struct ChoicePoint<'p, N> {
    checkpoint: Checkpoint<N>,
    continuation: Continuation<'p>,
    alternative: Alternative<'p>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running,
    Backtrack,
    Done,
}

/// Outcome of executing one goal.
enum Step<'p> {
    Continue(Continuation<'p>),
    Fail,
}

/// A lazy sequence of matches.
///
/// Results arrive in preference order: greedy repetition before shorter
/// repetition, an optional pattern's consuming branch before its skipping
/// branch, and earlier choice alternatives before later ones. Dropping the
/// iterator abandons any unexplored branches.
#[derive(Debug)]
pub struct Matches<'p, N> {
    context: MatchContext<'p, N>,
    goals: Continuation<'p>,
    choices: Vec<ChoicePoint<'p, N>>,
    state: State,
    steps: usize,
    found: usize,
}

impl<'p, N: SyntaxNode> Matches<'p, N> {
    fn new(pattern: &'p Pattern, siblings: Vec<Child<N>>) -> Self {
        debug!(
            target: MATCH_TARGET,
            elements = pattern.elements().len(),
            siblings = siblings.len(),
            "starting match"
        );

        let goals = pattern
            .elements()
            .iter()
            .rev()
            .fold(Continuation::default(), |next, node| {
                next.then(Goal::Match { node, role: &ROOT })
            });

        Self {
            context: MatchContext::new(Cursor::root(siblings)),
            goals,
            choices: Vec::new(),
            state: State::Running,
            steps: 0,
            found: 0,
        }
    }

    /// Returns how many goals and backtracks have been executed so far.
    ///
    /// Callers bound runaway patterns by checking this between pulls.
    #[must_use]
    pub const fn steps(&self) -> usize {
        self.steps
    }

    fn push_choice(&mut self, continuation: Continuation<'p>, alternative: Alternative<'p>) {
        self.choices.push(ChoicePoint {
            checkpoint: self.context.checkpoint(),
            continuation,
            alternative,
        });
    }

    /// Restores the newest viable choice point. Returns `false` when none
    /// remain.
    fn backtrack(&mut self) -> bool {
        while let Some(point) = self.choices.pop() {
            trace!(
                target: MATCH_TARGET,
                pending = self.choices.len(),
                "backtracking"
            );
            self.context.rollback(&point.checkpoint);
            match point.alternative {
                Alternative::Resume => {
                    self.goals = point.continuation;
                    return true;
                }
                Alternative::Choice { alternatives, role } => {
                    let Some((node, later)) = alternatives.split_first() else {
                        continue;
                    };
                    if !later.is_empty() {
                        self.choices.push(ChoicePoint {
                            checkpoint: point.checkpoint,
                            continuation: point.continuation.clone(),
                            alternative: Alternative::Choice {
                                alternatives: later,
                                role,
                            },
                        });
                    }
                    self.goals = point.continuation.then(Goal::Match { node, role });
                    return true;
                }
            }
        }
        false
    }

    fn execute(&mut self, goal: Goal<'p>, rest: Continuation<'p>) -> Step<'p> {
        match goal {
            Goal::Match { node, role } => self.match_node(node, role, rest),
            Goal::Bind { name, start } => {
                self.context.bind_since(name, start);
                Step::Continue(rest)
            }
            Goal::Iterate {
                repeat,
                role,
                count,
                iteration_start,
            } => Step::Continue(self.iterate(repeat, role, count, iteration_start, rest)),
            Goal::CheckRole { kind, start } => {
                let accepted = self
                    .context
                    .cursor()
                    .consumed_since(start)
                    .iter()
                    .all(|child| child.role.accepts(kind));
                if accepted {
                    Step::Continue(rest)
                } else {
                    Step::Fail
                }
            }
            Goal::Ascend => {
                if self.context.ascend() {
                    Step::Continue(rest)
                } else {
                    Step::Fail
                }
            }
        }
    }

    fn match_node(
        &mut self,
        node: &'p PatternNode,
        role: &'p Role,
        rest: Continuation<'p>,
    ) -> Step<'p> {
        match node {
            PatternNode::Any(binding) => {
                let Some(child) = self.consumable(role) else {
                    return Step::Fail;
                };
                let target = child.node.clone();
                if let Some(name) = binding {
                    self.context.bind(name, target);
                }
                self.context.advance();
                Step::Continue(rest)
            }
            PatternNode::Capture(capture) => {
                let start = self.context.cursor().index();
                Step::Continue(
                    rest.then(Goal::Bind {
                        name: &capture.name,
                        start,
                    })
                    .then(Goal::Match {
                        node: &capture.inner,
                        role,
                    }),
                )
            }
            PatternNode::Optional(inner) => {
                self.push_choice(rest.clone(), Alternative::Resume);
                Step::Continue(rest.then(Goal::Match { node: inner, role }))
            }
            PatternNode::Repeat(repeat) => Step::Continue(rest.then(Goal::Iterate {
                repeat,
                role,
                count: 0,
                iteration_start: None,
            })),
            PatternNode::Choice(alternatives) => self.match_choice(alternatives, role, rest),
            PatternNode::Backreference(name) => self.match_backreference(name, role, rest),
            PatternNode::Literal(literal) => self.match_literal(literal, role, rest),
            PatternNode::Role(adapter) => {
                let start = self.context.cursor().index();
                Step::Continue(
                    rest.then(Goal::CheckRole {
                        kind: adapter.kind,
                        start,
                    })
                    .then(Goal::Match {
                        node: &adapter.pattern,
                        role,
                    }),
                )
            }
        }
    }

    fn match_choice(
        &mut self,
        alternatives: &'p [PatternNode],
        role: &'p Role,
        rest: Continuation<'p>,
    ) -> Step<'p> {
        let Some((first, later)) = alternatives.split_first() else {
            return Step::Fail;
        };
        if !later.is_empty() {
            self.push_choice(
                rest.clone(),
                Alternative::Choice {
                    alternatives: later,
                    role,
                },
            );
        }
        Step::Continue(rest.then(Goal::Match { node: first, role }))
    }

    fn match_backreference(
        &mut self,
        name: &str,
        role: &Role,
        rest: Continuation<'p>,
    ) -> Step<'p> {
        let Some(child) = self.consumable(role) else {
            return Step::Fail;
        };
        let equal = {
            let mut bound = self.context.bound(name).peekable();
            bound.peek().is_some() && bound.all(|node| node.content_eq(&child.node))
        };
        if !equal {
            return Step::Fail;
        }
        self.context.advance();
        Step::Continue(rest)
    }

    fn match_literal(
        &mut self,
        literal: &'p Literal,
        role: &'p Role,
        rest: Continuation<'p>,
    ) -> Step<'p> {
        let Some(child) = self.consumable(role) else {
            return Step::Fail;
        };
        let target = &child.node;
        if target.kind() != literal.kind {
            return Step::Fail;
        }
        if let Some(text) = &literal.text
            && !target.text_eq(text)
        {
            return Step::Fail;
        }

        let children = target.children();
        self.context.descend(children);
        let goals = literal
            .children
            .iter()
            .rev()
            .fold(rest.then(Goal::Ascend), |next, slot| {
                next.then(Goal::Match {
                    node: &slot.pattern,
                    role: &slot.role,
                })
            });
        Step::Continue(goals)
    }

    /// Schedules the next iteration of a repeat, leaving the shorter
    /// alternative on the choice stack so longer runs are reported first.
    fn iterate(
        &mut self,
        repeat: &'p Repeat,
        role: &'p Role,
        count: usize,
        iteration_start: Option<usize>,
        rest: Continuation<'p>,
    ) -> Continuation<'p> {
        let position = self.context.cursor().index();
        if iteration_start == Some(position) {
            // The last iteration consumed nothing; more would loop forever.
            return rest;
        }
        if count >= repeat.min {
            if !repeat.allows_more(count) {
                return rest;
            }
            self.push_choice(rest.clone(), Alternative::Resume);
        }
        rest.then(Goal::Iterate {
            repeat,
            role,
            count: count + 1,
            iteration_start: Some(position),
        })
        .then(Goal::Match {
            node: &repeat.inner,
            role,
        })
    }

    /// Returns the sibling under the cursor if it may fill a slot labelled
    /// `role`.
    fn consumable(&self, role: &Role) -> Option<&Child<N>> {
        self.context
            .cursor()
            .current()
            .filter(|child| role.is_root() || child.role == *role)
    }
}

impl<N: SyntaxNode> Iterator for Matches<'_, N> {
    type Item = Match<N>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.state {
                State::Done => return None,
                State::Backtrack => {
                    self.steps += 1;
                    if !self.backtrack() {
                        self.state = State::Done;
                        debug!(
                            target: MATCH_TARGET,
                            steps = self.steps,
                            matches = self.found,
                            "match exhausted"
                        );
                        return None;
                    }
                    self.state = State::Running;
                }
                State::Running => {
                    self.steps += 1;
                    let Some((goal, rest)) = self.goals.pop() else {
                        self.state = State::Backtrack;
                        if self.context.cursor().at_end() {
                            self.found += 1;
                            trace!(target: MATCH_TARGET, steps = self.steps, "match found");
                            return Some(Match::new(self.context.snapshot()));
                        }
                        continue;
                    };
                    if let Step::Continue(next) = self.execute(goal, rest) {
                        self.goals = next;
                    } else {
                        self.state = State::Backtrack;
                    }
                }
            }
        }
    }
}
