//! Rendering of extracted documents as frontmatter + MDX, or as JSON.

mod cleanup;
pub mod frontmatter;
mod json;
mod mdx;
mod options;
mod result;

pub use cleanup::{CleanupOptions, CleanupPipeline, CleanupPreset};
pub use frontmatter::{
    parse_frontmatter, split_frontmatter, to_frontmatter, ElementFrontmatter,
    FullExampleFrontmatter, GeneralFrontmatter, RdfProperties, SesFrontmatter,
    VocabularyFrontmatter,
};
pub use json::{to_json, JsonFormat};
pub use mdx::{
    full_example_index, title_heading, to_mdx, to_mdx_with_stats, MdxRenderer,
    FULL_EXAMPLE_INDEX_TITLE, TITLE_WRAP_WIDTH,
};
pub use options::RenderOptions;
pub use result::{ConversionStats, RenderResult};
