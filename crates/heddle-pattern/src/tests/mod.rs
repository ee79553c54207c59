//! Unit tests for `heddle_pattern`.

mod compile_tests;
mod render_tests;
