//! Unit and behaviour tests for `heddle_syntax`.

mod behaviour;
