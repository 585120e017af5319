//! # isbdm-mdx
//!
//! Conversion of legacy ISBDM HTML documentation pages into frontmatter +
//! MDX documents for a static documentation site.
//!
//! Five kinds of page are understood: element definitions, controlled
//! vocabularies, string encoding schemes, full examples and general
//! guidance. Each is extracted into a typed
//! document model and rendered as a YAML header followed by an MDX body.
//!
//! ## Quick Start
//!
//! ```no_run
//! use isbdm_mdx::convert_file;
//!
//! fn main() -> isbdm_mdx::Result<()> {
//!     let mdx = convert_file("ISBDM/docs/statements/1025.html")?;
//!     std::fs::write("docs/statements/1025.mdx", mdx)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **One converter per kind**: element, vocabulary and SES pages
//! - **Stable headers**: field order and quoting fixed by typed records
//! - **Example repair**: duplicated example tables collapsed at extraction
//! - **Batch conversion**: mirrored output trees, optional Rayon parallelism
//! - **Verification**: completeness, similarity and vocabulary checks

pub mod batch;
pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod verify;

// Re-export commonly used types
pub use batch::{process_directory, BatchOptions, BatchReport, FileOutcome};
pub use convert::{
    ConvertOptions, ConvertResult, ConverterRegistry, DocumentConverter, OutputFormat,
};
pub use detect::{detect_kind, detect_kind_from_path, DocumentKind};
pub use error::{Error, Result};
pub use model::{
    ContentBlock, Document, ElementDocument, ElementMetadata, ExampleGroup, ExampleRow,
    FullExampleDocument, FullExampleEntry, GeneralDocument, Namespaces, PrefixTable,
    PropertyKind, SesDocument, TypeRef, Vocabulary, VocabularyConcept,
};
pub use parser::{ErrorMode, ParseOptions, SourceDocument};
pub use render::{CleanupOptions, CleanupPreset, ConversionStats, JsonFormat, RenderOptions};

use std::path::Path;

/// Convert a page to frontmatter + MDX with default options.
///
/// The document kind is detected from the file name and markup.
///
/// # Example
///
/// ```no_run
/// use isbdm_mdx::convert_file;
///
/// let mdx = convert_file("ISBDM/docs/ves/1275.html").unwrap();
/// println!("{}", mdx);
/// ```
pub fn convert_file<P: AsRef<Path>>(path: P) -> Result<String> {
    Ok(convert_file_with_options(path, &ConvertOptions::default())?.content)
}

/// Convert a page with custom options.
///
/// # Example
///
/// ```no_run
/// use isbdm_mdx::{convert_file_with_options, ConvertOptions, RenderOptions};
///
/// let options = ConvertOptions::new()
///     .with_render_options(RenderOptions::new().with_inline_metadata(true));
/// let result = convert_file_with_options("ISBDM/docs/statements/1025.html", &options).unwrap();
/// println!("{} paragraphs", result.stats.paragraph_count);
/// ```
pub fn convert_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &ConvertOptions,
) -> Result<ConvertResult> {
    ConverterRegistry::with_defaults().convert(path.as_ref(), options)
}

/// Convert page markup. `path` names the page; it is not read.
pub fn convert_str(html: &str, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
    ConverterRegistry::with_defaults().convert_str(html, path, options)
}

/// Extract the document model of a page without rendering it.
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    extract_file_with_options(path, &ConvertOptions::default())
}

/// Extract the document model of a page with custom options.
///
/// `options.kind` forces the kind; otherwise it is detected.
pub fn extract_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &ConvertOptions,
) -> Result<Document> {
    let path = path.as_ref();
    let html = convert::read_source(path)?;
    let kind = match options.kind {
        Some(kind) => kind,
        None => detect_kind(path, &html)?,
    };
    let registry = ConverterRegistry::with_defaults();
    let converter = registry
        .get(kind)
        .ok_or_else(|| Error::Other(format!("No converter for kind: {}", kind)))?;
    converter.extract(&SourceDocument::parse(&html), path, &options.parse)
}

/// Extract a page and dump its document model as JSON.
///
/// # Example
///
/// ```no_run
/// use isbdm_mdx::{to_json, JsonFormat};
///
/// let json = to_json("ISBDM/docs/ves/1275.html", JsonFormat::Pretty).unwrap();
/// std::fs::write("1275.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = extract_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for converting pages.
///
/// # Example
///
/// ```no_run
/// use isbdm_mdx::IsbdmMdx;
///
/// let result = IsbdmMdx::new()
///     .lenient()
///     .with_inline_metadata()
///     .with_compact_uris()
///     .convert("ISBDM/docs/statements/1025.html")?;
/// println!("{}", result.content);
/// # Ok::<(), isbdm_mdx::Error>(())
/// ```
pub struct IsbdmMdx {
    options: ConvertOptions,
}

impl IsbdmMdx {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: ConvertOptions::default(),
        }
    }

    /// Fall back to the file stem when a page has no title.
    pub fn lenient(mut self) -> Self {
        self.options.parse = self.options.parse.lenient();
        self
    }

    /// Force the document kind instead of detecting it.
    pub fn with_kind(mut self, kind: DocumentKind) -> Self {
        self.options.kind = Some(kind);
        self
    }

    /// Use custom namespace URIs.
    pub fn with_namespaces(mut self, namespaces: Namespaces) -> Self {
        self.options.parse = self.options.parse.with_namespaces(namespaces);
        self
    }

    /// Embed the RDF map in the element reference marker.
    pub fn with_inline_metadata(mut self) -> Self {
        self.options.render = self.options.render.with_inline_metadata(true);
        self
    }

    /// Compact header URIs into prefixed names.
    pub fn with_compact_uris(mut self) -> Self {
        self.options.render = self.options.render.with_compact_uris(true);
        self
    }

    /// Set the sidebar position of element documents.
    pub fn with_sidebar_position(mut self, position: u32) -> Self {
        self.options.render = self.options.render.with_sidebar_position(position);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup(mut self, preset: CleanupPreset) -> Self {
        self.options.render = self
            .options
            .render
            .with_cleanup(CleanupOptions::from_preset(preset));
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.options.output_format = format;
        self
    }

    /// Options this builder has collected.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert a page.
    pub fn convert<P: AsRef<Path>>(&self, path: P) -> Result<ConvertResult> {
        convert_file_with_options(path, &self.options)
    }

    /// Convert a page and write the result.
    pub fn convert_to_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<ConvertResult> {
        ConverterRegistry::with_defaults().convert_to_file(input.as_ref(), output.as_ref(), &self.options)
    }

    /// Extract a page without rendering it.
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> Result<Document> {
        extract_file_with_options(path, &self.options)
    }

    /// Convert a directory of pages with these options.
    pub fn convert_directory<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
        batch: BatchOptions,
    ) -> Result<BatchReport> {
        let batch = batch.with_convert_options(self.options.clone());
        process_directory(input.as_ref(), output.as_ref(), &batch)
    }
}

impl Default for IsbdmMdx {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const VOCABULARY: &str = r#"<div class="col-md-7">
        <h3>Colour content</h3>
        <div class="guid"><p>Terms for colour.</p></div>
        <div class="row"><div class="vesValue"><p>black</p></div><div><p>Dark.</p></div></div>
    </div>"#;

    #[test]
    fn test_builder() {
        let builder = IsbdmMdx::new()
            .lenient()
            .with_inline_metadata()
            .with_sidebar_position(3)
            .with_cleanup(CleanupPreset::Minimal);

        let options = builder.options();
        assert!(options.parse.is_lenient());
        assert!(options.render.inline_metadata);
        assert_eq!(options.render.sidebar_position, 3);
        assert_eq!(options.render.cleanup, Some(CleanupOptions::minimal()));
    }

    #[test]
    fn test_builder_default() {
        let builder = IsbdmMdx::default();
        assert!(!builder.options().render.inline_metadata);
        assert_eq!(builder.options().kind, None);
    }

    #[test]
    fn test_convert_file_missing() {
        let result = convert_file("/nonexistent/1025.html");
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_extract_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("1275.html");
        fs::write(&path, VOCABULARY).unwrap();

        let doc = extract_file(&path).unwrap();
        assert_eq!(doc.kind(), DocumentKind::Vocabulary);
        match doc {
            Document::Vocabulary(vocab) => {
                assert_eq!(vocab.id.as_deref(), Some("1275"));
                assert_eq!(vocab.concepts.len(), 1);
            }
            other => panic!("unexpected document: {:?}", other.kind()),
        }
    }

    #[test]
    fn test_to_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("1275.html");
        fs::write(&path, VOCABULARY).unwrap();

        let json = to_json(&path, JsonFormat::Compact).unwrap();
        assert!(json.contains("\"kind\":\"vocabulary\""));
        assert!(json.contains("\"value\":\"black\""));
    }
}
