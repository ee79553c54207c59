//! Unit tests for `heddle_tree`.

mod role_tests;
