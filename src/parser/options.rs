//! Parsing options and configuration.

use super::inline::{BraceStyle, InlineOptions};
use crate::model::Namespaces;

/// Options for extracting documents from legacy HTML pages.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Base URIs for element and vocabulary identifiers
    pub namespaces: Namespaces,

    /// Docs section override (otherwise derived from the source path)
    pub section: Option<String>,

    /// Inline markup settings
    pub inline: InlineOptions,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (fall back to the file stem when the title is missing).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set both namespaces.
    pub fn with_namespaces(mut self, namespaces: Namespaces) -> Self {
        self.namespaces = namespaces;
        self
    }

    /// Set the element namespace.
    pub fn with_element_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespaces.elements = namespace.into();
        self
    }

    /// Set the vocabulary namespace.
    pub fn with_values_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespaces.values = namespace.into();
        self
    }

    /// Force the docs section instead of deriving it from the path.
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Set how literal braces are written.
    pub fn with_brace_style(mut self, braces: BraceStyle) -> Self {
        self.inline.braces = braces;
        self
    }

    /// Check if lenient mode is enabled.
    pub fn is_lenient(&self) -> bool {
        self.error_mode == ErrorMode::Lenient
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on a missing title
    #[default]
    Strict,
    /// Substitute defaults and continue
    Lenient,
}
