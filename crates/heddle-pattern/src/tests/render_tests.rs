//! Tests for diagnostic rendering.

use heddle_tree::Role;
use insta::assert_snapshot;
use rstest::rstest;

use crate::tests::trees::{expression_role, sum};
use crate::{Pattern, PatternNode, render};

#[rstest]
#[case::wildcard(PatternNode::any(), "$_")]
#[case::named_wildcard(PatternNode::any_named("X"), "$X")]
#[case::capture(
    PatternNode::capture("XS", PatternNode::zero_or_more(PatternNode::any())),
    "$XS=$_*"
)]
#[case::one_or_more(PatternNode::one_or_more(PatternNode::any()), "$_+")]
#[case::open_range(PatternNode::repeat(PatternNode::any(), 2, None), "$_{2,}")]
#[case::closed_range(PatternNode::repeat(PatternNode::any(), 1, Some(3)), "$_{1,3}")]
#[case::optional(
    PatternNode::optional(PatternNode::leaf("identifier", "a")),
    r#"(identifier "a")?"#
)]
#[case::choice(
    PatternNode::choice([PatternNode::any_named("A"), PatternNode::backreference("A")]),
    r"($A | \A)"
)]
#[case::token(PatternNode::leaf(";", ";"), r#"";""#)]
#[case::adapter(PatternNode::any_named("T").as_type(), "<type $T>")]
fn nodes_render_compactly(#[case] node: PatternNode, #[case] expected: &str) {
    assert_eq!(node.to_string(), expected);
}

#[test]
fn templates_render_as_s_expressions() {
    let arguments = PatternNode::literal("arguments")
        .child(Role::CHILD, PatternNode::leaf("(", "("))
        .child(
            Role::CHILD,
            PatternNode::capture("ARGS", PatternNode::zero_or_more(PatternNode::any())),
        )
        .child(Role::CHILD, PatternNode::leaf(")", ")"));
    let call: PatternNode = PatternNode::literal("call_expression")
        .child(
            expression_role("function"),
            PatternNode::any_named("F").as_expression(),
        )
        .child(Role::new("arguments"), arguments)
        .into();

    assert_snapshot!(
        call.to_string(),
        @r#"(call_expression function: <expression $F> arguments: (arguments "(" $ARGS=$_* ")"))"#
    );
}

#[test]
fn concrete_trees_render_through_from_node() {
    let tree = sum("a", "b");
    let node = PatternNode::from_node(&tree.root());
    assert_snapshot!(
        node.to_string(),
        @r#"(binary_expression left: (identifier "a") operator: "+" right: (identifier "b"))"#
    );
}

#[test]
fn sequences_render_space_separated() {
    let pattern = Pattern::compile_sequence([
        PatternNode::any_named("X"),
        PatternNode::backreference("X"),
    ])
    .expect("compiles");
    assert_eq!(pattern.to_string(), r"$X \X");
}

#[test]
fn render_writes_into_any_buffer() {
    let mut out = String::from("pattern: ");
    render(&PatternNode::any(), &mut out).expect("writing to a string succeeds");
    assert_eq!(out, "pattern: $_");
}
