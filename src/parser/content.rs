//! Content-block conversion.
//!
//! Walks the siblings that follow a section heading and linearizes them
//! into [`Division`]s of [`ContentBlock`]s, in document order. Example
//! blocks are de-duplicated here: the legacy pages repeat truncated copies
//! of example annotations, and only complete text survives.

use super::html::{
    child_elements, first_in, has_class, is_heading, next_element_siblings, select_in, tag_name,
    text_of,
};
use super::inline::{element_path, inline_text, is_inline, InlineBuffer, InlineOptions};
use crate::model::{ContentBlock, Division, DivisionRole, ExampleGroup, ExampleRow};
use scraper::{ElementRef, Node};

/// Converts section content into divisions and blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentConverter {
    inline: InlineOptions,
}

impl ContentConverter {
    /// Create a converter with the given inline settings.
    pub fn new(inline: InlineOptions) -> Self {
        Self { inline }
    }

    /// Inline settings in use.
    pub fn inline_options(&self) -> &InlineOptions {
        &self.inline
    }

    /// Convert everything after `heading` up to the next heading.
    pub fn convert_section(&self, heading: ElementRef<'_>) -> Vec<Division> {
        let mut divisions: Vec<Division> = Vec::new();

        for element in next_element_siblings(heading) {
            if is_heading(&element) {
                break;
            }
            let Some(division) = self.convert_division(element) else {
                continue;
            };
            match divisions.last_mut() {
                Some(last)
                    if last.role == DivisionRole::Plain && division.role == DivisionRole::Plain =>
                {
                    last.blocks.extend(division.blocks);
                }
                _ => divisions.push(division),
            }
        }

        divisions
    }

    /// Classify one top-level element and convert it.
    ///
    /// Returns `None` for elements that produce no content.
    pub fn convert_division(&self, element: ElementRef<'_>) -> Option<Division> {
        if has_class(&element, "guid") {
            let blocks = self.collect_blocks(element);
            return (!blocks.is_empty())
                .then(|| Division::with_blocks(DivisionRole::Guidance, blocks));
        }

        if has_class(&element, "stip") {
            let mandatory = first_in(element, ".mandatory").is_some();
            let blocks = self.collect_blocks(element);
            if blocks.is_empty() && !mandatory {
                return None;
            }
            return Some(Division::with_blocks(
                DivisionRole::Stipulation { mandatory },
                blocks,
            ));
        }

        let mut blocks = Vec::new();
        let mut buffer = InlineBuffer::new(self.inline);
        self.push_child(element, &mut blocks, &mut buffer);
        flush(&mut buffer, &mut blocks);

        (!blocks.is_empty()).then(|| Division::with_blocks(DivisionRole::Plain, blocks))
    }

    /// Convert the children of a container into blocks.
    pub fn collect_blocks(&self, container: ElementRef<'_>) -> Vec<ContentBlock> {
        let mut blocks = Vec::new();
        let mut buffer = InlineBuffer::new(self.inline);
        self.push_children(container, &mut blocks, &mut buffer);
        flush(&mut buffer, &mut blocks);
        blocks
    }

    fn push_children(
        &self,
        container: ElementRef<'_>,
        blocks: &mut Vec<ContentBlock>,
        buffer: &mut InlineBuffer,
    ) {
        for child in container.children() {
            match child.value() {
                Node::Text(text) => buffer.push_text(text),
                Node::Element(_) => {
                    if let Some(element) = ElementRef::wrap(child) {
                        self.push_child(element, blocks, buffer);
                    }
                }
                _ => {}
            }
        }
    }

    fn push_child(
        &self,
        element: ElementRef<'_>,
        blocks: &mut Vec<ContentBlock>,
        buffer: &mut InlineBuffer,
    ) {
        if has_class(&element, "mandatory") || has_class(&element, "linkEx") {
            return;
        }

        if is_example_block(&element) {
            flush(buffer, blocks);
            blocks.extend(
                self.example_groups(element)
                    .into_iter()
                    .map(ContentBlock::ExampleGroup),
            );
            return;
        }

        if has_class(&element, "seeAlsoAdd") {
            flush(buffer, blocks);
            blocks.extend(see_also_links(element));
            return;
        }

        if is_inline(&element) {
            buffer.push_element(element);
            return;
        }

        flush(buffer, blocks);
        match tag_name(&element) {
            "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let text = inline_text(element, &self.inline);
                if !text.is_empty() {
                    blocks.push(ContentBlock::paragraph(text));
                }
            }
            "ul" | "ol" => {
                let items: Vec<String> = child_elements(element)
                    .filter(|li| tag_name(li) == "li")
                    .map(|li| inline_text(li, &self.inline))
                    .filter(|item| !item.is_empty())
                    .collect();
                if !items.is_empty() {
                    blocks.push(ContentBlock::list(tag_name(&element) == "ol", items));
                }
            }
            "hr" | "img" | "script" | "style" => {}
            _ => {
                self.push_children(element, blocks, buffer);
                flush(buffer, blocks);
            }
        }
    }

    /// Extract de-duplicated example groups from an example block.
    ///
    /// Child `div`s of the `.xamples` container are groups. Rows placed
    /// directly in the container, label/value and annotation rows alike,
    /// form groups separated by `<hr>`.
    pub fn example_groups(&self, block: ElementRef<'_>) -> Vec<ExampleGroup> {
        let container = first_in(block, ".xamples").unwrap_or(block);
        let mut groups = Vec::new();
        let mut pending = PendingGroup::default();

        for child in child_elements(container) {
            if tag_name(&child) == "hr" {
                pending.close_into(&mut groups);
            } else if is_annotation(&child) {
                pending.fragments.push(inline_text(child, &self.inline));
            } else if has_class(&child, "row") {
                pending.rows.extend(self.example_rows(child));
                pending.fragments.extend(
                    select_in(child, ".editComment, .xampleNarrative")
                        .into_iter()
                        .map(|c| inline_text(c, &self.inline)),
                );
            } else if tag_name(&child) == "div" {
                pending.close_into(&mut groups);
                let fragments = select_in(child, ".editComment, .xampleNarrative")
                    .into_iter()
                    .map(|c| inline_text(c, &self.inline))
                    .collect();
                let group = ExampleGroup::new(
                    self.example_rows(child),
                    merge_annotation_fragments(fragments),
                );
                if !group.is_empty() {
                    groups.push(group);
                }
            }
        }
        pending.close_into(&mut groups);

        deduplicate_groups(groups)
    }

    fn example_rows(&self, element: ElementRef<'_>) -> Vec<ExampleRow> {
        select_in(element, ".xampleLabel")
            .into_iter()
            .filter_map(|label| {
                let value = next_element_siblings(label)
                    .find(|e| has_class(e, "xampleValue"))
                    .or_else(|| {
                        label
                            .parent()
                            .and_then(ElementRef::wrap)
                            .and_then(|parent| first_in(parent, ".xampleValue"))
                    })?;
                Some(ExampleRow::new(
                    inline_text(label, &self.inline),
                    inline_text(value, &self.inline),
                ))
            })
            .collect()
    }
}

#[derive(Default)]
struct PendingGroup {
    rows: Vec<ExampleRow>,
    fragments: Vec<String>,
}

impl PendingGroup {
    fn close_into(&mut self, groups: &mut Vec<ExampleGroup>) {
        let rows = std::mem::take(&mut self.rows);
        let fragments = std::mem::take(&mut self.fragments);
        let group = ExampleGroup::new(rows, merge_annotation_fragments(fragments));
        if !group.is_empty() {
            groups.push(group);
        }
    }
}

fn flush(buffer: &mut InlineBuffer, blocks: &mut Vec<ContentBlock>) {
    if let Some(text) = buffer.take() {
        blocks.push(ContentBlock::paragraph(text));
    }
}

fn is_example_block(element: &ElementRef<'_>) -> bool {
    has_class(element, "xampleBlockStip")
        || has_class(element, "xampleBlockGuid")
        || has_class(element, "xamples")
}

fn is_annotation(element: &ElementRef<'_>) -> bool {
    has_class(element, "editComment") || has_class(element, "xampleNarrative")
}


/// Number of runs of bare text directly inside a container.
///
/// Each run of text nodes and inline elements between two block children
/// becomes one paragraph when the container is converted.
pub fn loose_text_runs(container: ElementRef<'_>) -> usize {
    let mut runs = 0;
    let mut open = false;
    for child in container.children() {
        match child.value() {
            Node::Text(text) => open |= !text.trim().is_empty(),
            Node::Element(_) => {
                let Some(element) = ElementRef::wrap(child) else {
                    continue;
                };
                if has_class(&element, "mandatory") || has_class(&element, "linkEx") {
                    continue;
                }
                if is_inline(&element) {
                    open |= !text_of(element).is_empty();
                } else if open {
                    runs += 1;
                    open = false;
                }
            }
            _ => {}
        }
    }
    runs + usize::from(open)
}

/// Cross-reference links of a `.seeAlsoAdd` block.
pub fn see_also_links(element: ElementRef<'_>) -> Vec<ContentBlock> {
    let mut links = select_in(element, ".linkMenuElement");
    if links.is_empty() {
        links = select_in(element, "a[href]");
    }
    links
        .into_iter()
        .filter_map(|link| {
            let href = link.value().attr("href")?;
            Some(ContentBlock::SeeAlso {
                label: text_of(link),
                path: element_path(href),
            })
        })
        .collect()
}

/// Check whether a fragment is a cut-off copy of annotation text.
///
/// A fragment is truncated when it opens more `[` than it closes, or when
/// it is a strict prefix of another fragment.
pub fn is_truncated(fragment: &str, all: &[String]) -> bool {
    let opens = fragment.matches('[').count();
    let closes = fragment.matches(']').count();
    if opens > closes {
        return true;
    }
    all.iter()
        .any(|other| other.len() > fragment.len() && other.starts_with(fragment))
}

/// Merge the annotation fragments of one example group.
///
/// Truncated fragments and repeats are discarded and the complete ones are
/// kept in first-seen order. When every fragment is truncated the longest
/// one is kept.
pub fn merge_annotation_fragments(fragments: Vec<String>) -> Option<String> {
    let fragments: Vec<String> = fragments
        .into_iter()
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect();
    if fragments.is_empty() {
        return None;
    }

    let mut kept: Vec<&str> = Vec::new();
    for fragment in &fragments {
        if is_truncated(fragment, &fragments) {
            log::debug!("Discarding truncated annotation fragment: {}", fragment);
            continue;
        }
        if !kept.contains(&fragment.as_str()) {
            kept.push(fragment);
        }
    }

    if kept.is_empty() {
        let mut longest = &fragments[0];
        for fragment in &fragments[1..] {
            if fragment.len() > longest.len() {
                longest = fragment;
            }
        }
        return Some(longest.clone());
    }

    Some(kept.join(" "))
}

/// Drop example groups that are truncated or repeated copies of another group.
///
/// A group is a copy of another when its rows are empty or identical to the
/// other's rows and its annotation is a prefix of (or equal to, for a later
/// group) the other's annotation.
pub fn deduplicate_groups(groups: Vec<ExampleGroup>) -> Vec<ExampleGroup> {
    let keep: Vec<bool> = groups
        .iter()
        .enumerate()
        .map(|(i, group)| {
            !groups
                .iter()
                .enumerate()
                .any(|(j, other)| i != j && is_copy_of(group, i, other, j))
        })
        .collect();

    groups
        .into_iter()
        .zip(keep)
        .filter_map(|(group, keep)| {
            if !keep {
                log::debug!("Dropping duplicate example group: {:?}", group.annotation);
            }
            keep.then_some(group)
        })
        .collect()
}

fn is_copy_of(group: &ExampleGroup, index: usize, other: &ExampleGroup, other_index: usize) -> bool {
    if !group.rows.is_empty() && group.rows != other.rows {
        return false;
    }
    match (&group.annotation, &other.annotation) {
        (Some(mine), Some(theirs)) => {
            (theirs.len() > mine.len() && theirs.starts_with(mine.as_str()))
                || (mine == theirs && other_index < index)
        }
        (None, Some(_)) => true,
        (None, None) => other_index < index,
        (Some(_), None) => false,
    }
}
