//! Rendering options and configuration.

use super::CleanupOptions;

/// Options for rendering extracted documents as frontmatter + MDX.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Embed the RDF map as a JSON literal in the element reference marker
    pub inline_metadata: bool,

    /// `sidebar_position` written to element headers
    pub sidebar_position: u32,

    /// `sidebar_level` written to element headers
    pub sidebar_level: u32,

    /// Compact URIs in headers into CURIEs
    pub compact_uris: bool,

    /// Text cleanup applied to the finished document
    pub cleanup: Option<CleanupOptions>,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable inline metadata.
    pub fn with_inline_metadata(mut self, inline: bool) -> Self {
        self.inline_metadata = inline;
        self
    }

    /// Set the sidebar position.
    pub fn with_sidebar_position(mut self, position: u32) -> Self {
        self.sidebar_position = position;
        self
    }

    /// Set the sidebar level.
    pub fn with_sidebar_level(mut self, level: u32) -> Self {
        self.sidebar_level = level;
        self
    }

    /// Enable or disable URI compaction.
    pub fn with_compact_uris(mut self, compact: bool) -> Self {
        self.compact_uris = compact;
        self
    }

    /// Set cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = Some(cleanup);
        self
    }

    /// Disable cleanup.
    pub fn without_cleanup(mut self) -> Self {
        self.cleanup = None;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            inline_metadata: false,
            sidebar_position: 1,
            sidebar_level: 2,
            compact_uris: false,
            cleanup: Some(CleanupOptions::default()),
        }
    }
}
