//! Legacy HTML page parsing.
//!
//! [`SourceDocument`] wraps the parsed page. The `fields`, `content`, and
//! per-kind extractors turn it into the document model.

mod content;
mod element;
pub mod fields;
mod fullex;
mod general;
mod html;
mod inline;
mod options;
mod ses;
mod vocabulary;

pub use content::{
    deduplicate_groups, is_truncated, loose_text_runs, merge_annotation_fragments, see_also_links,
    ContentConverter,
};
pub use element::{extract_element, extract_sections, SECTION_TITLES};
pub use fullex::{extract_full_example, FIRST_POSITION};
pub use general::extract_general;
pub use html::{collapse_whitespace, normalize_text, text_of, SourceDocument};
pub use inline::{
    element_path, escape_text, inline_text, link_stem, site_path, BraceStyle, InlineOptions,
};
pub use options::{ErrorMode, ParseOptions};
pub use ses::{extract_ses, ses_id, OVERVIEW_ID};
pub use vocabulary::extract_vocabulary;
