//! Tree-sitter front end for the heddle pattern engine.
//!
//! This crate turns source files into trees the engine can match and turns
//! code-shaped text templates into patterns:
//!
//! - **Parsing** via [`Parser`], producing a [`ParseResult`] whose nodes are
//!   exposed to the engine as [`SourceNode`]s
//! - **Templates** via [`Template`], compiling `$VAR` templates into
//!   [`heddle_pattern::Pattern`]s
//! - **Search** via [`Template::find_all`], reporting [`SearchMatch`]es with
//!   their captures
//! - **Rewriting** via [`Rewriter`], replacing matches with substituted text
//!
//! # Supported Languages
//!
//! - Rust (`.rs`)
//! - Python (`.py`, `.pyi`)
//! - TypeScript (`.ts`, `.tsx`, `.mts`, `.cts`)
//!
//! # Template Language
//!
//! Templates are written in the host language with metavariables in place of
//! the parts that vary:
//!
//! - `$VAR` - matches one node and captures it; repeated uses must agree
//! - `$_` - matches one node without capturing it
//! - `$$$VAR` - matches zero or more sibling nodes and captures them
//!
//! # Example: Search
//!
//! ```
//! use heddle_syntax::{Parser, SupportedLanguage, Template};
//!
//! let mut parser = Parser::new(SupportedLanguage::Rust)?;
//! let parsed = parser.parse("fn main() { println!(\"hello\"); }")?;
//!
//! let template = Template::compile("fn $NAME() { $$$BODY }", SupportedLanguage::Rust)?;
//! for found in template.find_all(&parsed) {
//!     if let Some(name) = found.capture("NAME") {
//!         assert_eq!(name.text(), "main");
//!     }
//! }
//! # Ok::<(), heddle_syntax::SyntaxError>(())
//! ```
//!
//! # Example: Rewriting
//!
//! ```
//! use heddle_syntax::{RewriteRule, Rewriter, SupportedLanguage, Template};
//!
//! let template = Template::compile("dbg!($EXPR)", SupportedLanguage::Rust)?;
//! let rule = RewriteRule::new(template, "println!(\"{:?}\", $EXPR)")?;
//!
//! let rewriter = Rewriter::new(SupportedLanguage::Rust);
//! let result = rewriter.apply(&rule, "fn main() { dbg!(x); }")?;
//!
//! assert!(result.has_changes());
//! # Ok::<(), heddle_syntax::SyntaxError>(())
//! ```

mod config;
mod error;
mod language;
mod metavariables;
mod node;
mod parser;
mod position;
mod rewriter;
mod search;
mod template;

pub use config::SearchConfig;
pub use error::SyntaxError;
pub use language::SupportedLanguage;
pub use metavariables::{MetaVarKind, MetaVariable};
pub use node::{STATEMENT, SourceNode, role_for};
pub use parser::{ParseResult, Parser, SyntaxErrorInfo};
pub use position::Position;
pub use rewriter::{RewriteResult, RewriteRule, Rewriter};
pub use search::{CapturedNode, CapturedNodes, CapturedValue, SearchMatch};
pub use template::Template;

#[cfg(test)]
mod tests;
