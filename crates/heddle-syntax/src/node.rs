//! Tree-sitter nodes as engine input.
//!
//! [`SourceNode`] pairs a Tree-sitter node with the source it was parsed
//! from and implements [`SyntaxNode`]. Children include anonymous tokens
//! such as punctuation and keywords but skip extras such as comments. Roles
//! come from the grammar's field names:
//!
//! | Field / position | Role kind |
//! |------------------|-----------|
//! | `type`, `return_type` | type |
//! | `body`, `consequence` | block |
//! | `value` of a variable declaration | variable initialiser |
//! | `value`, `condition`, `left`, `right`, `argument`, `function` | expression |
//! | unnamed named child of a block or file | statement |

use std::fmt;
use std::ops::Range;

use heddle_tree::{Child, Role, RoleKind, SyntaxNode};

use crate::position::Position;

/// Role of unnamed children of blocks and files.
pub const STATEMENT: Role = Role::from_static("statement", Some(RoleKind::Statement));

const STATEMENT_PARENTS: &[&str] = &[
    "block",
    "statement_block",
    "source_file",
    "module",
    "program",
];

const DECLARATIONS: &[&str] = &[
    "let_declaration",
    "const_item",
    "static_item",
    "variable_declarator",
];

/// Returns whether `kind` holds a sequence of statements.
#[must_use]
pub(crate) fn holds_statements(kind: &str) -> bool {
    STATEMENT_PARENTS.contains(&kind)
}

/// Returns the role of a child of a `parent_kind` node.
#[must_use]
pub fn role_for(parent_kind: &str, field: Option<&'static str>, named: bool) -> Role {
    match field {
        Some(name) => Role::from_static(name, field_kind(parent_kind, name)),
        None if named && holds_statements(parent_kind) => STATEMENT,
        None => Role::CHILD,
    }
}

fn field_kind(parent_kind: &str, field: &str) -> Option<RoleKind> {
    match field {
        "type" | "return_type" => Some(RoleKind::Type),
        "body" | "consequence" => Some(RoleKind::Block),
        "value" if DECLARATIONS.contains(&parent_kind) => Some(RoleKind::VariableInitializer),
        "value" | "condition" | "left" | "right" | "argument" | "function" => {
            Some(RoleKind::Expression)
        }
        _ => None,
    }
}

/// A node of a parsed source file.
#[derive(Clone, Copy)]
pub struct SourceNode<'a> {
    node: tree_sitter::Node<'a>,
    source: &'a str,
}

impl<'a> SourceNode<'a> {
    /// Wraps `node`, which must belong to a tree parsed from `source`.
    #[must_use]
    pub const fn new(node: tree_sitter::Node<'a>, source: &'a str) -> Self {
        Self { node, source }
    }

    /// Returns the underlying Tree-sitter node.
    #[must_use]
    pub const fn node(&self) -> tree_sitter::Node<'a> {
        self.node
    }

    /// Returns a handle to another node of the same tree.
    pub(crate) const fn at(&self, node: tree_sitter::Node<'a>) -> Self {
        Self::new(node, self.source)
    }

    /// Returns the byte range the node covers.
    #[must_use]
    pub fn byte_range(&self) -> Range<usize> {
        self.node.byte_range()
    }

    /// Returns the full source text the node covers.
    #[must_use]
    pub fn source_text(&self) -> &'a str {
        self.source.get(self.node.byte_range()).unwrap_or_default()
    }

    /// Returns the source text of a node without children.
    #[must_use]
    pub fn leaf_text(&self) -> Option<&'a str> {
        (self.node.child_count() == 0).then(|| self.source_text())
    }

    /// Returns where the node starts.
    #[must_use]
    pub fn start_position(&self) -> Position {
        self.node.start_position().into()
    }

    /// Returns where the node ends.
    #[must_use]
    pub fn end_position(&self) -> Position {
        self.node.end_position().into()
    }
}

impl SyntaxNode for SourceNode<'_> {
    fn kind(&self) -> &str {
        self.node.kind()
    }

    fn text(&self) -> Option<&str> {
        self.leaf_text()
    }

    fn children(&self) -> Vec<Child<Self>> {
        let parent_kind = self.node.kind();
        let mut children = Vec::with_capacity(self.node.child_count());
        let mut cursor = self.node.walk();
        if !cursor.goto_first_child() {
            return children;
        }
        loop {
            let node = cursor.node();
            if !node.is_extra() {
                let role = role_for(parent_kind, cursor.field_name(), node.is_named());
                children.push(Child::new(role, self.at(node)));
            }
            if !cursor.goto_next_sibling() {
                return children;
            }
        }
    }

    fn parent(&self) -> Option<Self> {
        self.node
            .parent()
            .map(|parent| self.at(parent))
    }

    fn content_eq(&self, other: &Self) -> bool {
        self.node.kind() == other.node.kind() && self.source_text() == other.source_text()
    }
}

impl PartialEq for SourceNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl Eq for SourceNode<'_> {}

impl fmt::Debug for SourceNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceNode")
            .field("kind", &self.node.kind())
            .field("range", &self.node.byte_range())
            .finish()
    }
}

/// Walks the subtree under `root` in pre-order without recursion.
pub(crate) fn pre_order<'t>(
    root: tree_sitter::Node<'t>,
) -> impl Iterator<Item = tree_sitter::Node<'t>> {
    let mut cursor = root.walk();
    let mut exhausted = false;
    std::iter::from_fn(move || {
        if exhausted {
            return None;
        }
        let node = cursor.node();
        if !cursor.goto_first_child() {
            while !cursor.goto_next_sibling() {
                if !cursor.goto_parent() {
                    exhausted = true;
                    break;
                }
            }
        }
        Some(node)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::SupportedLanguage;
    use crate::parser::Parser;
    use rstest::rstest;

    fn parse(language: SupportedLanguage, source: &str) -> crate::parser::ParseResult {
        Parser::new(language)
            .expect("parser init")
            .parse(source)
            .expect("parse")
    }

    fn find<'a>(root: SourceNode<'a>, kind: &str) -> SourceNode<'a> {
        pre_order(root.node())
            .find(|node| node.kind() == kind)
            .map(|node| root.at(node))
            .expect("node of kind present")
    }

    #[rstest]
    #[case(None, "block", true, "statement", Some(RoleKind::Statement))]
    #[case(None, "module", true, "statement", Some(RoleKind::Statement))]
    #[case(None, "arguments", true, "child", None)]
    #[case(Some("type"), "let_declaration", true, "type", Some(RoleKind::Type))]
    #[case(
        Some("value"),
        "let_declaration",
        true,
        "value",
        Some(RoleKind::VariableInitializer)
    )]
    #[case(Some("value"), "field_initializer", true, "value", Some(RoleKind::Expression))]
    #[case(Some("body"), "function_item", true, "body", Some(RoleKind::Block))]
    #[case(Some("name"), "function_item", true, "name", None)]
    fn roles_follow_field_names(
        #[case] field: Option<&'static str>,
        #[case] parent: &str,
        #[case] named: bool,
        #[case] expected_name: &str,
        #[case] expected_kind: Option<RoleKind>,
    ) {
        let role = role_for(parent, field, named);
        assert_eq!(role.name(), expected_name);
        assert_eq!(role.kind(), expected_kind);
    }

    #[test]
    fn unnamed_tokens_in_blocks_are_plain_children() {
        assert_eq!(role_for("block", None, false), Role::CHILD);
    }

    #[test]
    fn children_include_tokens_with_roles() {
        let parsed = parse(SupportedLanguage::Rust, "fn main() { a + b; }");
        let sum = find(parsed.root(), "binary_expression");

        let children = sum.children();
        let summary: Vec<_> = children
            .iter()
            .map(|child| (child.role.name().to_owned(), child.node.source_text()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("left".to_owned(), "a"),
                ("operator".to_owned(), "+"),
                ("right".to_owned(), "b"),
            ]
        );
    }

    #[test]
    fn comments_are_not_children() {
        let parsed = parse(SupportedLanguage::Rust, "fn main() { // note\n    call(); }");
        let block = find(parsed.root(), "block");
        assert!(
            block
                .children()
                .iter()
                .all(|child| child.node.kind() != "line_comment")
        );
    }

    #[test]
    fn only_leaves_have_text() {
        let parsed = parse(SupportedLanguage::Python, "x = 1\n");
        let assignment = find(parsed.root(), "assignment");
        assert_eq!(assignment.text(), None);
        assert_eq!(find(parsed.root(), "identifier").text(), Some("x"));
    }

    #[test]
    fn content_equality_compares_source_text() {
        let parsed = parse(SupportedLanguage::Rust, "fn main() { f(a.b); g(a.b); g(a.c); }");
        let fields: Vec<_> = pre_order(parsed.root_node())
            .filter(|node| node.kind() == "field_expression")
            .map(|node| SourceNode::new(node, parsed.source()))
            .collect();
        let [first, second, third] = fields.as_slice() else {
            panic!("expected three field expressions");
        };
        assert!(first.content_eq(second));
        assert!(!first.content_eq(third));
        assert_ne!(first, second);
    }

    #[test]
    fn parents_are_navigable() {
        let parsed = parse(SupportedLanguage::TypeScript, "f(x);");
        let arguments = find(parsed.root(), "arguments");
        assert_eq!(
            arguments.parent().map(|parent| parent.node().kind()),
            Some("call_expression")
        );
        assert!(parsed.root().parent().is_none());
    }

    #[test]
    fn pre_order_visits_parents_before_children() {
        let parsed = parse(SupportedLanguage::Python, "f(x)\n");
        let kinds: Vec<_> = pre_order(parsed.root_node())
            .filter(tree_sitter::Node::is_named)
            .map(|node| node.kind())
            .collect();
        assert_eq!(
            kinds,
            vec![
                "module",
                "expression_statement",
                "call",
                "identifier",
                "argument_list",
                "identifier"
            ]
        );
    }
}
