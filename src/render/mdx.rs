//! MDX rendering for extracted documents.
//!
//! Every renderer writes the YAML header first, then the body. Output is
//! deterministic: the same document and options always give the same bytes.

use crate::error::Result;
use crate::detect::FULL_EXAMPLE_DIR;
use crate::model::{
    ContentBlock, Division, DivisionRole, Document, ElementDocument, ExampleGroup,
    FullExampleDocument, GeneralDocument, Namespaces, PrefixTable, Section, SesDocument,
    Vocabulary,
};

use super::frontmatter::{
    to_frontmatter, ElementFrontmatter, FullExampleFrontmatter, GeneralFrontmatter, RdfProperties,
    SesFrontmatter, VocabularyFrontmatter,
};
use super::{CleanupPipeline, ConversionStats, RenderOptions, RenderResult};

/// Titles longer than this many characters are wrapped onto two lines.
pub const TITLE_WRAP_WIDTH: usize = 60;

const VOCABULARY_TABLE_IMPORT: &str =
    "import VocabularyTable from '@site/src/components/global/VocabularyTable';";

const EXAMPLE_TABLE_IMPORT: &str =
    "import { ExampleTable } from '@site/src/components/global/ExampleTable';";

/// Title of the generated full example index page.
pub const FULL_EXAMPLE_INDEX_TITLE: &str = "Full Examples";

const FULL_EXAMPLE_INDEX_INTRO: &str = "These examples demonstrate how to describe various \
     manifestations using the ISBD for Manifestation model.";

/// Render a document to MDX text.
pub fn to_mdx(doc: &Document, options: &RenderOptions) -> Result<String> {
    let mut prefixes = Namespaces::default().prefix_table();
    let renderer = MdxRenderer::new(options.clone());
    Ok(renderer.render(doc, &mut prefixes)?.content)
}

/// Render a document to MDX with statistics, compacting URIs through `prefixes`.
pub fn to_mdx_with_stats(
    doc: &Document,
    options: &RenderOptions,
    prefixes: &mut PrefixTable,
) -> Result<RenderResult> {
    let renderer = MdxRenderer::new(options.clone());
    renderer.render(doc, prefixes)
}

/// Table layout of example groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExampleStyle {
    /// `| Property | Value |` with bracketed annotations
    Property,
    /// `| Relation | Example |` with `*Note*:` annotations
    Relation,
}

impl ExampleStyle {
    fn header(&self) -> &'static str {
        match self {
            ExampleStyle::Property => "| Property | Value |\n|:---------|:------|\n",
            ExampleStyle::Relation => "| Relation | Example |\n|----------|----------|\n",
        }
    }

    fn annotation(&self, text: &str) -> String {
        match self {
            ExampleStyle::Property if text.starts_with('[') => format!("*{}*", text),
            ExampleStyle::Property => format!("*[{}]*", text),
            ExampleStyle::Relation => format!("*Note*: {}", text),
        }
    }
}

/// MDX renderer.
pub struct MdxRenderer {
    options: RenderOptions,
    stats: ConversionStats,
}

impl MdxRenderer {
    /// Create a new MDX renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: ConversionStats::new(),
        }
    }

    /// Render a document.
    pub fn render(mut self, doc: &Document, prefixes: &mut PrefixTable) -> Result<RenderResult> {
        let mut output = String::new();
        let mut warnings = Vec::new();

        match doc {
            Document::Element(element) => self.render_element(&mut output, element, prefixes)?,
            Document::Vocabulary(vocab) => {
                warnings = vocab.validate();
                self.render_vocabulary(&mut output, vocab, prefixes)?;
            }
            Document::Ses(ses) => self.render_ses(&mut output, ses)?,
            Document::FullExample(fullex) => self.render_full_example(&mut output, fullex)?,
            Document::General(general) => self.render_general(&mut output, general)?,
        }

        if let Some(ref cleanup_options) = self.options.cleanup {
            let pipeline = CleanupPipeline::new(cleanup_options.clone());
            output = pipeline.process(&output);
        }

        self.stats.count_text(&output);

        Ok(RenderResult::new(output, doc.kind(), self.stats).with_warnings(warnings))
    }

    fn render_element(
        &mut self,
        output: &mut String,
        doc: &ElementDocument,
        prefixes: &mut PrefixTable,
    ) -> Result<()> {
        let header = ElementFrontmatter::from_document(doc, &self.options, prefixes);
        output.push_str(&to_frontmatter(&header)?);
        output.push('\n');

        output.push_str(&title_heading(&doc.metadata.label));
        output.push_str("\n\n## Element Reference\n\n");
        output.push_str(&self.element_reference(&header.rdf)?);
        output.push_str("\n\n");

        for section in &doc.sections {
            self.render_section(output, section, 2, ExampleStyle::Property);
        }
        Ok(())
    }

    fn element_reference(&self, rdf: &RdfProperties) -> Result<String> {
        if self.options.inline_metadata {
            let json = serde_json::to_string_pretty(rdf)?;
            Ok(format!(
                "<ElementReference frontMatter={{{{ RDF: {} }}}} />",
                json
            ))
        } else {
            Ok("<ElementReference frontMatter={frontMatter} />".to_string())
        }
    }

    fn render_section(
        &mut self,
        output: &mut String,
        section: &Section,
        level: usize,
        style: ExampleStyle,
    ) {
        if !section.title.is_empty() {
            self.stats.add_section();
            output.push_str(&"#".repeat(level));
            output.push(' ');
            output.push_str(&section.title);
            output.push_str("\n\n");
        }

        for division in &section.divisions {
            self.render_division(output, division, style);
        }

        for subsection in &section.subsections {
            self.render_section(output, subsection, level + 1, style);
        }
    }

    fn render_division(&mut self, output: &mut String, division: &Division, style: ExampleStyle) {
        match division.role {
            DivisionRole::Guidance => {
                output.push_str("<div className=\"guid\">\n\n");
                self.render_blocks(output, &division.blocks, style);
                output.push_str("</div>\n\n");
            }
            DivisionRole::Stipulation { mandatory } => {
                output.push_str("<div className=\"stip\">\n\n");
                if mandatory {
                    output.push_str("<Mandatory />\n\n");
                }
                self.render_blocks(output, &division.blocks, style);
                output.push_str("</div>\n\n");
            }
            DivisionRole::Plain => self.render_blocks(output, &division.blocks, style),
        }
    }

    fn render_blocks(&mut self, output: &mut String, blocks: &[ContentBlock], style: ExampleStyle) {
        let mut examples: Vec<&ExampleGroup> = Vec::new();

        for block in blocks {
            self.stats.add_block(block);
            if let ContentBlock::ExampleGroup(group) = block {
                examples.push(group);
                continue;
            }
            self.render_examples(output, &mut examples, style);

            match block {
                ContentBlock::Paragraph { text } => {
                    output.push_str(text);
                    output.push_str("\n\n");
                }
                ContentBlock::List { ordered, items } => {
                    for (i, item) in items.iter().enumerate() {
                        if *ordered {
                            output.push_str(&format!("{}. {}\n", i + 1, item));
                        } else {
                            output.push_str(&format!("- {}\n", item));
                        }
                    }
                    output.push('\n');
                }
                ContentBlock::SeeAlso { label, path } => {
                    output.push_str(&format!("<SeeAlso>[{}]({})</SeeAlso>\n\n", label, path));
                }
                ContentBlock::ExampleGroup(_) => {}
            }
        }

        self.render_examples(output, &mut examples, style);
    }

    /// Write pending example groups as one collapsible block.
    fn render_examples(
        &self,
        output: &mut String,
        examples: &mut Vec<&ExampleGroup>,
        style: ExampleStyle,
    ) {
        if examples.is_empty() {
            return;
        }

        output.push_str("<details>\n<summary>Examples</summary>\n\n");
        for group in examples.drain(..) {
            if !group.rows.is_empty() {
                output.push_str(style.header());
                for row in &group.rows {
                    output.push_str(&format!(
                        "| {} | {} |\n",
                        escape_cell(&row.property),
                        escape_cell(&row.value)
                    ));
                }
                output.push('\n');
            }
            if let Some(annotation) = &group.annotation {
                output.push_str(&style.annotation(annotation));
                output.push_str("\n\n");
            }
            output.push_str("<hr />\n\n");
        }
        output.push_str("</details>\n\n");
    }

    fn render_vocabulary(
        &mut self,
        output: &mut String,
        vocab: &Vocabulary,
        prefixes: &mut PrefixTable,
    ) -> Result<()> {
        self.stats.add_vocabulary(vocab);

        let header = VocabularyFrontmatter::from_vocabulary(vocab, &self.options, prefixes);
        output.push_str(&to_frontmatter(&header)?);
        output.push('\n');

        output.push_str(VOCABULARY_TABLE_IMPORT);
        output.push_str("\n\n# {frontMatter.title}\n\n");

        if let Some(link) = &vocab.element_link {
            output.push_str(&format!(
                "For use with element: [{}]({})\n\n",
                link.label, link.path
            ));
        }

        output.push_str("<VocabularyTable\n");
        output.push_str("  {...frontMatter}\n");
        output.push_str("  showTitle={false}\n");
        output.push_str("  filterPlaceholder=\"Filter vocabulary terms...\"\n");
        output.push_str("/>\n\n");

        if let Some(attribution) = &vocab.attribution {
            output.push_str("---\n\n");
            output.push_str(attribution);
            output.push_str("\n\n");
        }

        output.push_str("export const toc = VocabularyTable.generateTOC(frontMatter);\n");
        Ok(())
    }

    fn render_ses(&mut self, output: &mut String, doc: &SesDocument) -> Result<()> {
        output.push_str(&to_frontmatter(&SesFrontmatter::from_document(doc))?);
        output.push('\n');
        output.push_str(&format!("## {}\n\n", doc.title));

        for division in &doc.divisions {
            self.render_division(output, division, ExampleStyle::Relation);
        }
        Ok(())
    }

    fn render_general(&mut self, output: &mut String, doc: &GeneralDocument) -> Result<()> {
        output.push_str(&to_frontmatter(&GeneralFrontmatter::from_document(doc))?);
        output.push('\n');
        output.push_str(&format!("# {}\n\n", doc.title));

        for division in &doc.divisions {
            self.render_division(output, division, ExampleStyle::Relation);
        }
        Ok(())
    }

    fn render_full_example(&mut self, output: &mut String, doc: &FullExampleDocument) -> Result<()> {
        output.push_str(&to_frontmatter(&FullExampleFrontmatter::from_document(doc))?);
        output.push('\n');
        output.push_str(EXAMPLE_TABLE_IMPORT);
        output.push_str(&format!("\n\n# {}\n\n", doc.title));

        for paragraph in &doc.description {
            self.stats.add_paragraph();
            output.push_str(paragraph);
            output.push_str("\n\n");
        }

        if !doc.entries.is_empty() {
            self.stats.add_example_group(doc.entries.len());
        }
        let entries = serde_json::to_string_pretty(&doc.entries)?.replace('\n', "\n  ");
        output.push_str("<ExampleTable\n  entries={");
        output.push_str(&entries);
        output.push_str("}\n/>\n");
        Ok(())
    }
}

/// Index page of the full examples: `(title, file stem)` pairs listed by title.
pub fn full_example_index(pages: &[(String, String)]) -> Result<String> {
    let header = FullExampleFrontmatter {
        title: FULL_EXAMPLE_INDEX_TITLE.to_string(),
        sidebar_label: FULL_EXAMPLE_INDEX_TITLE.to_string(),
        sidebar_position: Some(1),
    };
    let mut output = to_frontmatter(&header)?;
    output.push_str(&format!(
        "\n# {}\n\n{}\n\n",
        FULL_EXAMPLE_INDEX_TITLE, FULL_EXAMPLE_INDEX_INTRO
    ));

    let mut sorted: Vec<&(String, String)> = pages.iter().collect();
    sorted.sort_by_cached_key(|(title, stem)| (title.to_lowercase(), stem.clone()));
    for (title, stem) in sorted {
        output.push_str(&format!(
            "- <InLink to=\"/docs/{}/{}\">{}</InLink>\n",
            FULL_EXAMPLE_DIR, stem, title
        ));
    }
    Ok(output)
}

/// `# label`, wrapped at the last space within the first 60 characters
/// when the label is longer than that.
pub fn title_heading(label: &str) -> String {
    if label.chars().count() <= TITLE_WRAP_WIDTH {
        return format!("# {}", label);
    }

    let split = label
        .char_indices()
        .take(TITLE_WRAP_WIDTH + 1)
        .filter(|(_, c)| *c == ' ')
        .map(|(i, _)| i)
        .last()
        .filter(|&i| i > 0);

    match split {
        Some(i) => format!("# {}\n  {}", &label[..i], &label[i + 1..]),
        None => format!("# {}", label),
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
