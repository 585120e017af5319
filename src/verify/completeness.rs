//! Completeness classification of converted documents.
//!
//! A converted document is compared with its source by counting
//! paragraphs and list items: `p`/`li` and bare text runs inside guidance
//! and stipulation blocks of the source, paragraph and list-item markers in
//! the converted body. Example annotations are not counted on either side.

use super::similarity::{mdx_plain_text, word_similarity, SIMILARITY_PASS};
use crate::batch::{collect_sources, output_path, BatchOptions};
use crate::convert::{read_source, OutputFormat};
use crate::error::Result;
use crate::parser::{loose_text_runs, text_of, SourceDocument};
use crate::render::split_frontmatter;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Ratio thresholds separating the completeness classes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Below this ratio a document is incomplete
    pub incomplete: f64,

    /// Below this ratio a document is partial
    pub partial: f64,
}

impl Thresholds {
    /// Create thresholds with defaults (0.5 and 0.9).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the incomplete threshold.
    pub fn with_incomplete(mut self, ratio: f64) -> Self {
        self.incomplete = ratio;
        self
    }

    /// Set the partial threshold.
    pub fn with_partial(mut self, ratio: f64) -> Self {
        self.partial = ratio;
        self
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            incomplete: 0.5,
            partial: 0.9,
        }
    }
}

/// Completeness class. Variants are ordered as reports list them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Completeness {
    Incomplete,
    Partial,
    Complete,
    Missing,
}

impl Completeness {
    /// Upper-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Completeness::Incomplete => "INCOMPLETE",
            Completeness::Partial => "PARTIAL",
            Completeness::Complete => "COMPLETE",
            Completeness::Missing => "MISSING",
        }
    }

    /// Check if the class fails verification.
    pub fn is_failure(&self) -> bool {
        matches!(self, Completeness::Incomplete | Completeness::Missing)
    }
}

impl fmt::Display for Completeness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Paragraph and list-item counts of one side of a comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContentCounts {
    pub paragraphs: usize,
    pub list_items: usize,
}

impl ContentCounts {
    /// Paragraphs plus list items.
    pub fn total(&self) -> usize {
        self.paragraphs + self.list_items
    }
}

impl fmt::Display for ContentCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.paragraphs, self.list_items)
    }
}

/// Count `p` and `li` elements inside guidance and stipulation blocks,
/// plus the bare text runs that convert to paragraphs of their own.
pub fn source_counts(doc: &SourceDocument) -> ContentCounts {
    let loose: usize = doc
        .select(".guid, .stip")
        .into_iter()
        .map(loose_text_runs)
        .sum();
    ContentCounts {
        paragraphs: doc.select(".guid p, .stip p").len() + loose,
        list_items: doc.select(".guid li, .stip li").len(),
    }
}

/// Count paragraph and list-item markers in a converted document body.
///
/// Markdown paragraphs are counted at their first line; embedded `<p>` and
/// `<li>` tags are counted as well. Headings, tables, component tags,
/// module statements and example annotations are not content.
pub fn converted_counts(text: &str) -> ContentCounts {
    let body = split_frontmatter(text).map_or(text, |(_, body)| body);
    let mut counts = ContentCounts {
        paragraphs: body.matches("<p>").count(),
        list_items: body.matches("<li>").count(),
    };

    let mut after_blank = true;
    for line in body.lines() {
        if line.trim().is_empty() {
            after_blank = true;
            continue;
        }
        if is_list_item(line.trim_start()) {
            counts.list_items += 1;
        } else if after_blank && starts_paragraph(line) {
            counts.paragraphs += 1;
        }
        after_blank = false;
    }
    counts
}

fn is_list_item(line: &str) -> bool {
    if line.starts_with("- ") || line.starts_with("* ") {
        return true;
    }
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    digits > 0 && line[digits..].starts_with(". ")
}

fn starts_paragraph(line: &str) -> bool {
    if line.starts_with("import ") || line.starts_with("export ") {
        return false;
    }
    if line.starts_with("*[") || line.starts_with("*Note*:") {
        return false;
    }
    line.chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || matches!(c, '*' | '_' | '[' | '`' | '"' | '(' | '\\'))
}

/// Classify a converted document against its source counts.
///
/// Returns the class and the converted/source ratio. A source without
/// paragraphs or list items is complete by definition.
pub fn classify(
    source: ContentCounts,
    converted: ContentCounts,
    thresholds: &Thresholds,
) -> (Completeness, f64) {
    let ratio = if source.total() == 0 {
        1.0
    } else {
        converted.total() as f64 / source.total() as f64
    };
    let status = if ratio < thresholds.incomplete {
        Completeness::Incomplete
    } else if ratio < thresholds.partial {
        Completeness::Partial
    } else {
        Completeness::Complete
    };
    (status, ratio)
}

/// Verification result for one document.
#[derive(Debug, Clone, Serialize)]
pub struct CompletenessReport {
    /// Document name (source file stem)
    pub name: String,

    /// Completeness class
    pub status: Completeness,

    /// Counts in the source page
    pub source: ContentCounts,

    /// Counts in the converted document, absent when it is missing
    pub converted: Option<ContentCounts>,

    /// Converted/source ratio
    pub ratio: Option<f64>,

    /// Word similarity percentage between source and converted text
    pub similarity: Option<u32>,
}

impl CompletenessReport {
    /// One-line explanation of the status.
    pub fn details(&self) -> String {
        let percent = self.ratio.map(|r| (r * 100.0).round() as i64).unwrap_or(0);
        match self.status {
            Completeness::Missing => "Converted file does not exist".to_string(),
            Completeness::Incomplete => {
                format!("Significantly less content ({}% of source)", percent)
            }
            Completeness::Partial => format!("May be missing some content ({}% of source)", percent),
            Completeness::Complete => format!("All content present ({}% of source)", percent),
        }
    }

    /// Check if word similarity reaches the passing percentage.
    pub fn similarity_passes(&self) -> bool {
        self.similarity.is_some_and(|s| s >= SIMILARITY_PASS)
    }
}

/// Compare source markup with converted text.
pub fn check_completeness(
    name: impl Into<String>,
    html: &str,
    converted: &str,
    thresholds: &Thresholds,
) -> CompletenessReport {
    let doc = SourceDocument::parse(html);
    let source = source_counts(&doc);
    let converted_counts = converted_counts(converted);
    let (status, ratio) = classify(source, converted_counts, thresholds);

    let source_text = doc
        .select_first(".col-md-7")
        .map(text_of)
        .unwrap_or_else(|| text_of(doc.root()));
    let similarity = word_similarity(&source_text, &mdx_plain_text(converted));

    CompletenessReport {
        name: name.into(),
        status,
        source,
        converted: Some(converted_counts),
        ratio: Some(ratio),
        similarity: Some(similarity),
    }
}

/// Verify one converted file against its source page.
///
/// A missing converted file yields a `MISSING` report, not an error.
pub fn verify_file(source: &Path, converted: &Path, thresholds: &Thresholds) -> Result<CompletenessReport> {
    let html = read_source(source)?;
    let name = crate::parser::fields::file_stem(source);

    if !converted.is_file() {
        return Ok(CompletenessReport {
            name,
            status: Completeness::Missing,
            source: source_counts(&SourceDocument::parse(&html)),
            converted: None,
            ratio: None,
            similarity: None,
        });
    }

    let text = fs::read_to_string(converted)?;
    let report = check_completeness(name, &html, &text, thresholds);
    log::debug!("{}: {} ({})", converted.display(), report.status, report.details());
    Ok(report)
}

/// Verify every source page in a directory against the converted tree.
///
/// Pages are selected as the batch driver selects them. Reports are sorted
/// by class (incomplete first), then by file name.
pub fn verify_directory(
    source_dir: &Path,
    converted_dir: &Path,
    thresholds: &Thresholds,
) -> Result<Vec<CompletenessReport>> {
    let sources = collect_sources(source_dir, &BatchOptions::default())?;
    let mut reports = sources
        .iter()
        .map(|source| {
            let converted: PathBuf = output_path(source_dir, converted_dir, source, OutputFormat::Mdx);
            verify_file(source, &converted, thresholds)
        })
        .collect::<Result<Vec<_>>>()?;
    reports.sort_by_key(|r| r.status);
    Ok(reports)
}
