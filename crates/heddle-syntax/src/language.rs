//! Language detection and grammar selection.
//!
//! Each [`SupportedLanguage`] maps to a Tree-sitter grammar and knows how to
//! embed a template fragment into a complete program when the fragment does
//! not parse on its own.

use std::path::Path;

use strum::{Display, EnumString, IntoStaticStr};

use crate::error::SyntaxError;

/// Name of the function templates are wrapped in when they need a body.
pub(crate) const TEMPLATE_WRAPPER: &str = "__heddle_template__";

/// Languages the front end can parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, IntoStaticStr)]
#[strum(ascii_case_insensitive)]
pub enum SupportedLanguage {
    /// Rust source files (`.rs`).
    #[default]
    #[strum(to_string = "rust", serialize = "rs")]
    Rust,
    /// Python source files (`.py`, `.pyi`).
    #[strum(to_string = "python", serialize = "py")]
    Python,
    /// TypeScript source files (`.ts`, `.tsx`, `.mts`, `.cts`).
    #[strum(to_string = "typescript", serialize = "ts")]
    TypeScript,
}

impl SupportedLanguage {
    /// Detects the language from a file extension.
    ///
    /// Returns `None` if the extension is not recognised.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "rs" => Some(Self::Rust),
            "py" | "pyi" => Some(Self::Python),
            "ts" | "tsx" | "mts" | "cts" => Some(Self::TypeScript),
            _ => None,
        }
    }

    /// Detects the language from a file path by examining its extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Detects the language of `path`, explaining why detection failed.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::UnsupportedExtension`] when the extension is not
    /// recognised and [`SyntaxError::MissingExtension`] when the path has no
    /// usable extension.
    pub fn detect(path: &Path) -> Result<Self, SyntaxError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => {
                Self::from_extension(ext).ok_or_else(|| SyntaxError::unsupported_extension(ext))
            }
            None => Err(SyntaxError::MissingExtension {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Returns the Tree-sitter grammar for this language.
    #[must_use]
    pub fn tree_sitter_language(self) -> tree_sitter::Language {
        match self {
            Self::Rust => tree_sitter_rust::LANGUAGE.into(),
            Self::Python => tree_sitter_python::LANGUAGE.into(),
            // TSX is a superset, so `.tsx` files parse too.
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }

    /// Returns the lower-case identifier for this language.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Returns all supported languages.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Rust, Self::Python, Self::TypeScript]
    }

    /// Returns the kind of the node Tree-sitter places at the root of a file.
    #[must_use]
    pub const fn root_kind(self) -> &'static str {
        match self {
            Self::Rust => "source_file",
            Self::Python => "module",
            Self::TypeScript => "program",
        }
    }

    /// Embeds a template fragment in a function body so statement and
    /// expression fragments parse.
    pub(crate) fn wrap_fragment(self, fragment: &str) -> String {
        match self {
            Self::Rust => {
                let trimmed = fragment.trim_end();
                let needs_semicolon =
                    !trimmed.is_empty() && !trimmed.ends_with(';') && !trimmed.ends_with('}');
                let terminator = if needs_semicolon { ";" } else { "" };
                format!("fn {TEMPLATE_WRAPPER}() {{ {trimmed}{terminator} }}")
            }
            Self::Python => {
                let mut out = format!("def {TEMPLATE_WRAPPER}():\n");
                if fragment.trim().is_empty() {
                    out.push_str("    pass\n");
                    return out;
                }
                for line in fragment.lines() {
                    out.push_str("    ");
                    out.push_str(line);
                    out.push('\n');
                }
                out
            }
            Self::TypeScript => format!("function {TEMPLATE_WRAPPER}() {{ {fragment} }}"),
        }
    }
}
