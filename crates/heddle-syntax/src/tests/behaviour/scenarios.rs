//! Scenario bindings for the `heddle-syntax` BDD feature file.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::scenario;

use super::SyntaxWorld;

/// Fresh world for each scenario.
#[fixture]
fn world() -> RefCell<SyntaxWorld> {
    super::world()
}

#[scenario(
    path = "tests/features/heddle_syntax.feature",
    name = "Template matches function definitions"
)]
fn template_matches_functions(world: RefCell<SyntaxWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/heddle_syntax.feature",
    name = "Template captures a run of arguments"
)]
fn template_captures_argument_runs(world: RefCell<SyntaxWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/heddle_syntax.feature",
    name = "Repeated metavariables must agree"
)]
fn repeated_metavariables_agree(world: RefCell<SyntaxWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/heddle_syntax.feature",
    name = "Template with no matches returns empty"
)]
fn template_without_matches(world: RefCell<SyntaxWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/heddle_syntax.feature",
    name = "Rewrite transforms matching code"
)]
fn rewrite_transforms_code(world: RefCell<SyntaxWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/heddle_syntax.feature",
    name = "Rewrite with no matches leaves code unchanged"
)]
fn rewrite_no_changes(world: RefCell<SyntaxWorld>) {
    drop(world);
}
