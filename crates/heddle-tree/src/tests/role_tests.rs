//! Tests for [`Role`] and [`RoleKind`].

use std::str::FromStr;

use rstest::rstest;

use crate::{Role, RoleKind};

#[test]
fn roles_compare_by_name_only() {
    let plain = Role::new("body");
    let typed = Role::new("body").expecting(RoleKind::Block);
    assert_eq!(plain, typed);
    assert_ne!(plain, Role::new("condition"));
}

#[test]
fn root_accepts_every_kind() {
    assert!(Role::ROOT.is_root());
    assert!(Role::ROOT.accepts(RoleKind::Statement));
    assert!(Role::ROOT.accepts(RoleKind::Type));
}

#[test]
fn labelled_slot_accepts_only_its_kind() {
    let slot = Role::new("return_type").expecting(RoleKind::Type);
    assert!(slot.accepts(RoleKind::Type));
    assert!(!slot.accepts(RoleKind::Expression));
    assert!(!Role::CHILD.accepts(RoleKind::Expression));
}

#[rstest]
#[case(RoleKind::Type, "type")]
#[case(RoleKind::Expression, "expression")]
#[case(RoleKind::Statement, "statement")]
#[case(RoleKind::Block, "block")]
#[case(RoleKind::VariableInitializer, "variable_initializer")]
fn role_kind_display_and_parse_agree(#[case] kind: RoleKind, #[case] text: &str) {
    assert_eq!(kind.to_string(), text);
    assert_eq!(RoleKind::from_str(text), Ok(kind));
}
