//! Word-frequency similarity between source and converted text.

use crate::render::split_frontmatter;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Similarity percentage at which a conversion passes.
pub const SIMILARITY_PASS: u32 = 60;

/// Shortest word (in characters) that takes part in the comparison, exclusive.
const MIN_WORD_LEN: usize = 3;

/// Percentage of the source's words (longer than three characters) found in
/// the target, counting each occurrence at most as often as the target has it.
///
/// An empty source or target scores 0.
pub fn word_similarity(source: &str, target: &str) -> u32 {
    let source_freq = word_frequencies(source);
    let target_freq = word_frequencies(target);

    let total: usize = source_freq.values().sum();
    if total == 0 || target_freq.is_empty() {
        return 0;
    }

    let matches: usize = source_freq
        .iter()
        .map(|(word, count)| (*count).min(target_freq.get(word).copied().unwrap_or(0)))
        .sum();

    ((matches as f64 / total as f64) * 100.0).round() as u32
}

fn word_frequencies(text: &str) -> HashMap<String, usize> {
    let mut freq = HashMap::new();
    for word in text.split_whitespace() {
        let word = word
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        if word.chars().count() > MIN_WORD_LEN {
            *freq.entry(word).or_insert(0) += 1;
        }
    }
    freq
}

/// Readable text of a converted document: header dropped, tags and
/// markdown punctuation removed.
pub fn mdx_plain_text(text: &str) -> String {
    static TAG: OnceLock<Option<Regex>> = OnceLock::new();
    let body = split_frontmatter(text).map_or(text, |(_, body)| body);

    let without_tags = match TAG.get_or_init(|| Regex::new(r"<[^>]*>").ok()) {
        Some(re) => re.replace_all(body, " ").into_owned(),
        None => body.to_string(),
    };

    without_tags
        .lines()
        .filter(|line| !line.starts_with("import ") && !line.starts_with("export "))
        .map(|line| line.replace(|c: char| "#*|[]()`\\".contains(c), " "))
        .collect::<Vec<_>>()
        .join(" ")
}
