//! Document kind detection.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Kind of documentation page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Element (property) definition
    Element,
    /// Controlled vocabulary
    Vocabulary,
    /// String encoding scheme
    Ses,
    /// Full example of a described manifestation
    FullExample,
    /// General information or introduction
    General,
}

impl DocumentKind {
    /// All kinds, in registration order.
    pub const ALL: [DocumentKind; 5] = [
        DocumentKind::Element,
        DocumentKind::Vocabulary,
        DocumentKind::Ses,
        DocumentKind::FullExample,
        DocumentKind::General,
    ];

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Element => "element",
            DocumentKind::Vocabulary => "vocabulary",
            DocumentKind::Ses => "ses",
            DocumentKind::FullExample => "fullex",
            DocumentKind::General => "general",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "element" => Ok(DocumentKind::Element),
            "vocabulary" | "ves" => Ok(DocumentKind::Vocabulary),
            "ses" => Ok(DocumentKind::Ses),
            "fullex" | "full_example" | "full-example" => Ok(DocumentKind::FullExample),
            "general" | "intro" => Ok(DocumentKind::General),
            other => Err(Error::UnknownKind(other.to_string())),
        }
    }
}

/// File-name prefix of string encoding scheme pages.
pub const SES_PREFIX: &str = "ISBDMSES";

/// Directory holding the full example pages.
pub const FULL_EXAMPLE_DIR: &str = "fullex";

/// Detect the kind of a page from its file name and markup.
///
/// Pages with guidance blocks but no element or vocabulary rows are
/// general information pages.
///
/// # Arguments
/// * `path` - Source path (only the name and parent directories are inspected)
/// * `html` - Page markup
///
/// # Returns
/// * `Ok(DocumentKind)` when a known layout is recognized
/// * `Err(Error::UnknownKind)` otherwise
pub fn detect_kind(path: &Path, html: &str) -> Result<DocumentKind> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    if stem.starts_with(SES_PREFIX) || has_component(path, "ses") {
        return Ok(DocumentKind::Ses);
    }
    if has_component(path, FULL_EXAMPLE_DIR) {
        return Ok(DocumentKind::FullExample);
    }
    if html.contains("vesValue") || has_component(path, "ves") {
        return Ok(DocumentKind::Vocabulary);
    }
    if html.contains("elref") || html.contains("eltext") {
        return Ok(DocumentKind::Element);
    }
    if html.contains("guid") {
        return Ok(DocumentKind::General);
    }

    Err(Error::UnknownKind(path.display().to_string()))
}

/// Detect the kind of a page on disk.
pub fn detect_kind_from_path<P: AsRef<Path>>(path: P) -> Result<DocumentKind> {
    let path = path.as_ref();
    let html = fs::read_to_string(path)?;
    detect_kind(path, &html)
}

fn has_component(path: &Path, name: &str) -> bool {
    path.parent()
        .map(|parent| {
            parent
                .components()
                .any(|c| c.as_os_str().eq_ignore_ascii_case(name))
        })
        .unwrap_or(false)
}
