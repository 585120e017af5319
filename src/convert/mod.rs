//! Document converters, one per document kind.
//!
//! Each converter extracts one kind of page into the document model and
//! renders it. The [`ConverterRegistry`] dispatches on the detected (or
//! forced) [`DocumentKind`].
//!
//! # Example
//!
//! ```no_run
//! use isbdm_mdx::convert::{ConverterRegistry, ConvertOptions};
//! use std::path::Path;
//!
//! fn main() -> isbdm_mdx::Result<()> {
//!     let registry = ConverterRegistry::with_defaults();
//!     let result = registry.convert(Path::new("docs/statements/1025.html"), &ConvertOptions::default())?;
//!     println!("{}", result.content);
//!     Ok(())
//! }
//! ```

mod element;
mod fullex;
mod general;
mod ses;
mod vocabulary;

pub use element::ElementConverter;
pub use fullex::FullExampleConverter;
pub use general::GeneralConverter;
pub use ses::SesConverter;
pub use vocabulary::VocabularyConverter;

use crate::detect::{detect_kind, DocumentKind};
use crate::error::{Error, Result};
use crate::model::Document;
use crate::parser::{ParseOptions, SourceDocument};
use crate::render::{to_json, to_mdx_with_stats, ConversionStats, JsonFormat, RenderOptions};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Options for document conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Extraction options
    pub parse: ParseOptions,

    /// Rendering options
    pub render: RenderOptions,

    /// Force a document kind instead of detecting it
    pub kind: Option<DocumentKind>,

    /// Output format
    pub output_format: OutputFormat,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set extraction options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Force the document kind.
    pub fn with_kind(mut self, kind: DocumentKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }
}

/// Output format for conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Frontmatter + MDX body
    #[default]
    Mdx,

    /// JSON dump of the extracted model
    Json,
}

/// Result of document conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Converted content
    pub content: String,

    /// Kind of the converted document
    pub kind: DocumentKind,

    /// Document title
    pub title: String,

    /// Conversion statistics
    pub stats: ConversionStats,

    /// Non-fatal problems, such as vocabulary validation warnings
    pub warnings: Vec<String>,

    /// MIME type of the output
    pub mime_type: &'static str,
}

impl ConvertResult {
    /// Create a new conversion result.
    pub fn new(content: String, kind: DocumentKind, title: impl Into<String>) -> Self {
        Self {
            content,
            kind,
            title: title.into(),
            stats: ConversionStats::default(),
            warnings: Vec::new(),
            mime_type: "text/mdx",
        }
    }

    /// Set conversion statistics.
    pub fn with_stats(mut self, stats: ConversionStats) -> Self {
        self.stats = stats;
        self
    }

    /// Set warnings.
    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    /// Set MIME type.
    pub fn with_mime_type(mut self, mime_type: &'static str) -> Self {
        self.mime_type = mime_type;
        self
    }

    /// Get content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Trait for document converters.
///
/// Implementors provide extraction for one [`DocumentKind`]; reading,
/// input checks and rendering are shared.
pub trait DocumentConverter: Send + Sync {
    /// Kind of page this converter handles.
    fn kind(&self) -> DocumentKind;

    /// Get the name of this converter.
    fn name(&self) -> &str {
        self.kind().as_str()
    }

    /// Extract the document model from a parsed page.
    fn extract(
        &self,
        source: &SourceDocument,
        path: &Path,
        options: &ParseOptions,
    ) -> Result<Document>;

    /// Convert page markup. `path` supplies the identifier and docs section.
    fn convert_str(&self, html: &str, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        if html.trim().is_empty() {
            return Err(Error::EmptyInput(path.to_path_buf()));
        }
        let source = SourceDocument::parse(html);
        let doc = self.extract(&source, path, &options.parse)?;
        render_document(&doc, options)
    }

    /// Convert a file at the given path.
    fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        let html = read_source(path)?;
        self.convert_str(&html, path, options)
    }
}

/// Render an extracted document in the requested output format.
pub fn render_document(doc: &Document, options: &ConvertOptions) -> Result<ConvertResult> {
    match options.output_format {
        OutputFormat::Mdx => {
            let mut prefixes = options.parse.namespaces.prefix_table();
            let rendered = to_mdx_with_stats(doc, &options.render, &mut prefixes)?;
            Ok(ConvertResult::new(rendered.content, doc.kind(), doc.title())
                .with_stats(rendered.stats)
                .with_warnings(rendered.warnings))
        }
        OutputFormat::Json => {
            let content = to_json(doc, JsonFormat::Pretty)?;
            Ok(ConvertResult::new(content, doc.kind(), doc.title())
                .with_mime_type("application/json"))
        }
    }
}

/// Read a source page, rejecting missing and empty files.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD.
pub fn read_source(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    let bytes = fs::read(path)?;
    let html = match String::from_utf8_lossy(&bytes) {
        Cow::Borrowed(text) => text.to_string(),
        Cow::Owned(text) => {
            log::debug!("Replaced invalid UTF-8 in {}", path.display());
            text
        }
    };
    if html.trim().is_empty() {
        return Err(Error::EmptyInput(path.to_path_buf()));
    }
    Ok(html)
}

/// Registry for document converters.
///
/// The registry maps document kinds to converters and provides
/// convenient methods for converting pages.
pub struct ConverterRegistry {
    by_kind: HashMap<DocumentKind, Arc<dyn DocumentConverter>>,
}

impl ConverterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            by_kind: HashMap::new(),
        }
    }

    /// Create a registry with a converter for every document kind.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(ElementConverter::new()));
        registry.register(Arc::new(VocabularyConverter::new()));
        registry.register(Arc::new(SesConverter::new()));
        registry.register(Arc::new(FullExampleConverter::new()));
        registry.register(Arc::new(GeneralConverter::new()));
        registry
    }

    /// Register a converter, replacing any converter of the same kind.
    pub fn register(&mut self, converter: Arc<dyn DocumentConverter>) {
        self.by_kind.insert(converter.kind(), converter);
    }

    /// Get the converter for a kind.
    pub fn get(&self, kind: DocumentKind) -> Option<Arc<dyn DocumentConverter>> {
        self.by_kind.get(&kind).cloned()
    }

    /// Get a converter by name (`element`, `vocabulary`, `ses`).
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentConverter>> {
        name.parse::<DocumentKind>().ok().and_then(|kind| self.get(kind))
    }

    /// Check if a kind has a converter.
    pub fn supports(&self, kind: DocumentKind) -> bool {
        self.by_kind.contains_key(&kind)
    }

    /// Convert page markup, detecting its kind unless the options force one.
    pub fn convert_str(&self, html: &str, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        if html.trim().is_empty() {
            return Err(Error::EmptyInput(path.to_path_buf()));
        }
        let kind = match options.kind {
            Some(kind) => kind,
            None => detect_kind(path, html)?,
        };
        let converter = self
            .get(kind)
            .ok_or_else(|| Error::Other(format!("No converter for kind: {}", kind)))?;

        log::debug!("Converting {} as {}", path.display(), kind);
        converter.convert_str(html, path, options)
    }

    /// Convert a file using the appropriate converter.
    pub fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        let html = read_source(path)?;
        self.convert_str(&html, path, options)
    }

    /// Convert a file and write the result, creating parent directories.
    pub fn convert_to_file(
        &self,
        input: &Path,
        output: &Path,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        let result = self.convert(input, options)?;
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(output, &result.content)?;
        log::debug!("Converted {} to {}", input.display(), output.display());
        Ok(result)
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
