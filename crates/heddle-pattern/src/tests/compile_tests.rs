//! Tests for pattern validation.

use heddle_tree::{Role, RoleKind};
use rstest::rstest;

use crate::tests::trees::expression_role;
use crate::{Pattern, PatternError, PatternNode};

#[rstest]
#[case::empty_choice(PatternNode::Choice(Vec::new()), PatternError::EmptyChoice)]
#[case::empty_wildcard_name(PatternNode::any_named(""), PatternError::EmptyCaptureName)]
#[case::empty_capture_name(
    PatternNode::capture("", PatternNode::any()),
    PatternError::EmptyCaptureName
)]
#[case::inverted_bounds(
    PatternNode::repeat(PatternNode::any(), 3, Some(1)),
    PatternError::invalid_repeat_bounds(3, 1)
)]
#[case::dangling_backreference(
    PatternNode::backreference("X"),
    PatternError::undeclared_backreference("X")
)]
#[case::self_reference(
    PatternNode::capture("X", PatternNode::backreference("X")),
    PatternError::undeclared_backreference("X")
)]
fn malformed_patterns_are_rejected(#[case] node: PatternNode, #[case] expected: PatternError) {
    assert_eq!(Pattern::compile(node), Err(expected));
}

#[test]
fn backreference_may_follow_its_capture() {
    let pattern = Pattern::compile_sequence([
        PatternNode::capture("X", PatternNode::any()),
        PatternNode::backreference("X"),
    ])
    .expect("compiles");
    assert_eq!(pattern.capture_names(), ["X"]);
}

#[test]
fn backreference_may_not_precede_its_capture() {
    let result = Pattern::compile_sequence([
        PatternNode::backreference("X"),
        PatternNode::any_named("X"),
    ]);
    assert_eq!(result, Err(PatternError::undeclared_backreference("X")));
}

#[test]
fn sibling_alternatives_cannot_reference_each_other() {
    let result = Pattern::compile(PatternNode::choice([
        PatternNode::any_named("A"),
        PatternNode::backreference("A"),
    ]));
    assert_eq!(result, Err(PatternError::undeclared_backreference("A")));
}

#[test]
fn names_from_any_alternative_are_visible_afterwards() {
    let pattern = Pattern::compile_sequence([
        PatternNode::choice([PatternNode::any_named("A"), PatternNode::any_named("B")]),
        PatternNode::backreference("B"),
    ])
    .expect("compiles");
    assert_eq!(pattern.capture_names(), ["A", "B"]);
}

#[test]
fn adapters_must_agree_with_their_slot() {
    let template: PatternNode = PatternNode::literal("binary_expression")
        .child(expression_role("left"), PatternNode::any().as_type())
        .into();

    assert_eq!(
        Pattern::compile(template),
        Err(PatternError::role_mismatch(
            "left",
            RoleKind::Expression,
            RoleKind::Type
        ))
    );
}

#[test]
fn adapters_fit_untyped_slots_and_the_top_level() {
    let template: PatternNode = PatternNode::literal("call")
        .child(Role::new("callee"), PatternNode::any().as_block())
        .into();
    assert!(Pattern::compile(template).is_ok());
    assert!(Pattern::compile(PatternNode::any().as_variable_initializer()).is_ok());
}

#[test]
fn nested_captures_are_listed_in_binding_order() {
    let pattern = Pattern::compile(PatternNode::capture(
        "OUTER",
        PatternNode::one_or_more(PatternNode::any_named("INNER")),
    ))
    .expect("compiles");
    assert_eq!(pattern.capture_names(), ["INNER", "OUTER"]);
}

#[test]
fn errors_describe_the_defect() {
    assert_eq!(
        PatternError::invalid_repeat_bounds(2, 1).to_string(),
        "repeat bounds are inverted: min 2 exceeds max 1"
    );
    assert_eq!(
        PatternError::role_mismatch("left", RoleKind::Expression, RoleKind::Type).to_string(),
        "slot 'left' expects expression but holds a type adapter"
    );
}
