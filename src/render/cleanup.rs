//! Final text cleanup for rendered documents.

use unicode_normalization::UnicodeNormalization;

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPreset {
    /// Unicode NFC normalization only
    Minimal,
    /// NFC, invisible characters, trailing whitespace and blank runs
    #[default]
    Standard,
}

/// Options for text cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Turn no-break spaces into spaces; drop zero-width spaces, byte
    /// order marks and U+FFFD left over from the legacy pages
    pub strip_invisible: bool,

    /// Strip whitespace at the end of each line
    pub trim_trailing_whitespace: bool,

    /// Maximum consecutive newlines (0 = unlimited)
    pub max_consecutive_newlines: u8,

    /// Leave the header block untouched
    pub preserve_frontmatter: bool,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
        }
    }

    /// Minimal cleanup options.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: true,
            strip_invisible: false,
            trim_trailing_whitespace: false,
            max_consecutive_newlines: 0,
            preserve_frontmatter: true,
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self {
            normalize_unicode: true,
            strip_invisible: true,
            trim_trailing_whitespace: true,
            max_consecutive_newlines: 2,
            preserve_frontmatter: true,
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Text cleanup pipeline.
#[derive(Debug, Clone, Default)]
pub struct CleanupPipeline {
    options: CleanupOptions,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self { options }
    }

    /// Create a pipeline from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        Self::new(CleanupOptions::from_preset(preset))
    }

    /// Process a document. The result ends with exactly one newline.
    pub fn process(&self, text: &str) -> String {
        let frontmatter = if self.options.preserve_frontmatter {
            split_header(text)
        } else {
            None
        };

        let mut result = match frontmatter {
            Some((header, body)) => {
                let body = self.process_content(body);
                if body.is_empty() {
                    header.to_string()
                } else {
                    format!("{}\n{}", header, body)
                }
            }
            None => self.process_content(text),
        };

        if !result.ends_with('\n') {
            result.push('\n');
        }
        result
    }

    fn process_content(&self, text: &str) -> String {
        let mut result = text.to_string();

        if self.options.normalize_unicode {
            result = result.nfc().collect();
        }

        if self.options.strip_invisible {
            result = result
                .chars()
                .filter_map(|c| match c {
                    '\u{00A0}' | '\u{202F}' => Some(' '),
                    '\u{200B}' | '\u{FEFF}' | '\u{FFFD}' => None,
                    other => Some(other),
                })
                .collect();
        }

        if self.options.trim_trailing_whitespace {
            result = result
                .lines()
                .map(str::trim_end)
                .collect::<Vec<_>>()
                .join("\n");
        }

        if self.options.max_consecutive_newlines > 0 {
            result = self.limit_newlines(&result);
        }

        result.trim_matches('\n').to_string()
    }

    fn limit_newlines(&self, text: &str) -> String {
        let max = self.options.max_consecutive_newlines as usize;
        let mut out = String::with_capacity(text.len());
        let mut run = 0;
        for c in text.chars() {
            if c == '\n' {
                run += 1;
                if run > max {
                    continue;
                }
            } else {
                run = 0;
            }
            out.push(c);
        }
        out
    }
}

/// Split a document into its `---` delimited header (delimiters included)
/// and the body that follows.
fn split_header(text: &str) -> Option<(&str, &str)> {
    let stripped = text.strip_prefix("---\n")?;
    let end_pos = stripped.find("\n---\n")?;
    let fm_end = 4 + end_pos + 5;
    Some((&text[..fm_end], &text[fm_end..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unicode_normalization() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Minimal);
        let result = pipeline.process("cafe\u{0301}");
        assert_eq!(result, "caf\u{00e9}\n");
    }

    #[test]
    fn test_limit_newlines() {
        let pipeline = CleanupPipeline::default();
        let result = pipeline.process("# Title\n\n\n\nBody   \n\n\nMore");
        assert_eq!(result, "# Title\n\nBody\n\nMore\n");
    }

    #[test]
    fn test_frontmatter_preservation() {
        let pipeline = CleanupPipeline::default();
        let text = "---\ntitle: Test\nnote: |\n  a\n\n\n  b\n---\n\n\n\nContent.";
        let result = pipeline.process(text);
        assert!(result.starts_with("---\ntitle: Test\nnote: |\n  a\n\n\n  b\n---\n"));
        assert!(result.ends_with("---\n\nContent.\n"));
    }

    #[test]
    fn test_strip_invisible() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Standard);
        assert_eq!(
            pipeline.process("\u{FEFF}Has\u{00A0}title\u{200B} proper\u{FFFD}"),
            "Has title proper\n"
        );

        let minimal = CleanupPipeline::from_preset(CleanupPreset::Minimal);
        assert_eq!(minimal.process("a\u{00A0}b"), "a\u{00A0}b\n");
    }

    #[test]
    fn test_idempotent() {
        let pipeline = CleanupPipeline::default();
        let once = pipeline.process("---\nid: '1'\n---\n\n# A\n\n\n\nB\n");
        assert_eq!(pipeline.process(&once), once);
    }
}
