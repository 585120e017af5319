//! Directory conversion.
//!
//! [`process_directory`] converts every matching page under an input
//! directory into a mirrored output tree. Each file is converted on its own;
//! a failure is recorded in the [`BatchReport`] and the batch continues.

use crate::convert::{ConvertOptions, ConverterRegistry, OutputFormat};
use crate::detect::DocumentKind;
use crate::error::{Error, Result};
use crate::render::{
    full_example_index, parse_frontmatter, ConversionStats, FullExampleFrontmatter,
};
use rayon::prelude::*;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File-name glob selecting source pages.
pub const DEFAULT_PATTERN: &str = "*.html";

/// File names that are never converted: section indexes are generated.
pub const DEFAULT_EXCLUDE: &str = "index.html";

/// File name of a generated section index.
pub const INDEX_FILE: &str = "index.mdx";

/// Options for directory conversion.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Glob matched against file names
    pub pattern: String,

    /// Regex of file names to leave out
    pub exclude: Option<String>,

    /// Overwrite existing outputs
    pub force: bool,

    /// Log every file at info level
    pub verbose: bool,

    /// Descend into sub-directories, mirroring them in the output
    pub recursive: bool,

    /// Convert files on the rayon thread pool
    pub parallel: bool,

    /// Per-file conversion options
    pub convert: ConvertOptions,
}

impl BatchOptions {
    /// Create batch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the file-name glob.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Set the exclusion regex.
    pub fn with_exclude(mut self, exclude: impl Into<String>) -> Self {
        self.exclude = Some(exclude.into());
        self
    }

    /// Convert every file matching the pattern.
    pub fn without_exclude(mut self) -> Self {
        self.exclude = None;
        self
    }

    /// Overwrite existing outputs.
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Log every file.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Walk sub-directories.
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Convert in parallel.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Force a document kind for every file.
    pub fn with_kind(mut self, kind: DocumentKind) -> Self {
        self.convert.kind = Some(kind);
        self
    }

    /// Set per-file conversion options.
    pub fn with_convert_options(mut self, options: ConvertOptions) -> Self {
        self.convert = options;
        self
    }

    fn matcher(&self) -> Result<FileMatcher> {
        let include = glob_to_regex(&self.pattern)?;
        let exclude = match &self.exclude {
            Some(pattern) => {
                Some(Regex::new(pattern).map_err(|e| Error::invalid_pattern(pattern.as_str(), e))?)
            }
            None => None,
        };
        Ok(FileMatcher { include, exclude })
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            exclude: Some(DEFAULT_EXCLUDE.to_string()),
            force: false,
            verbose: false,
            recursive: false,
            parallel: false,
            convert: ConvertOptions::default(),
        }
    }
}

struct FileMatcher {
    include: Regex,
    exclude: Option<Regex>,
}

impl FileMatcher {
    fn matches(&self, name: &str) -> bool {
        self.include.is_match(name)
            && !self.exclude.as_ref().is_some_and(|re| re.is_match(name))
    }
}

/// Compile a file-name glob (`*` and `?` wildcards) into an anchored regex.
pub fn glob_to_regex(pattern: &str) -> Result<Regex> {
    let mut source = String::with_capacity(pattern.len() + 8);
    source.push('^');
    for c in pattern.chars() {
        match c {
            '*' => source.push_str("[^/]*"),
            '?' => source.push('.'),
            _ => source.push_str(&regex::escape(&c.to_string())),
        }
    }
    source.push('$');
    Regex::new(&source).map_err(|e| Error::invalid_pattern(pattern, e))
}

/// What happened to one source file.
#[derive(Debug, Clone)]
pub enum FileOutcome {
    /// Converted and written
    Converted {
        input: PathBuf,
        output: PathBuf,
        kind: DocumentKind,
        stats: ConversionStats,
        warnings: Vec<String>,
    },

    /// Output already existed and `force` was off
    Skipped { input: PathBuf, output: PathBuf },

    /// Conversion failed
    Failed { input: PathBuf, error: String },
}

impl FileOutcome {
    /// Source file of this outcome.
    pub fn input(&self) -> &Path {
        match self {
            FileOutcome::Converted { input, .. }
            | FileOutcome::Skipped { input, .. }
            | FileOutcome::Failed { input, .. } => input,
        }
    }

    /// Check if the file failed.
    pub fn is_failure(&self) -> bool {
        matches!(self, FileOutcome::Failed { .. })
    }
}

/// Aggregated result of a directory conversion, in file-name order.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// One outcome per matched file
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    /// Number of files converted.
    pub fn converted(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Converted { .. }))
    }

    /// Number of files skipped.
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped { .. }))
    }

    /// Number of files that failed.
    pub fn failed(&self) -> usize {
        self.count(FileOutcome::is_failure)
    }

    /// Number of files processed.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Check if no file failed.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Failed files with their error messages.
    pub fn failures(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.outcomes.iter().filter_map(|o| match o {
            FileOutcome::Failed { input, error } => Some((input.as_path(), error.as_str())),
            _ => None,
        })
    }

    /// Statistics summed over every converted file.
    pub fn total_stats(&self) -> ConversionStats {
        let mut total = ConversionStats::default();
        for outcome in &self.outcomes {
            if let FileOutcome::Converted { stats, .. } = outcome {
                total.merge(stats);
            }
        }
        total
    }

    fn count(&self, predicate: impl Fn(&FileOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|&o| predicate(o)).count()
    }
}

/// Source files under `input` selected by the options, sorted by path.
pub fn collect_sources(input: &Path, options: &BatchOptions) -> Result<Vec<PathBuf>> {
    if !input.is_dir() {
        return Err(Error::NotFound(input.to_path_buf()));
    }
    let matcher = options.matcher()?;
    let max_depth = if options.recursive { usize::MAX } else { 1 };

    let mut files: Vec<PathBuf> = WalkDir::new(input)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| matcher.matches(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.into_path())
        .collect();
    files.sort();

    log::debug!("Found {} source files in {}", files.len(), input.display());
    Ok(files)
}

/// Output path mirroring `source` (relative to `input`) under `output`.
pub fn output_path(input: &Path, output: &Path, source: &Path, format: OutputFormat) -> PathBuf {
    let relative = source
        .strip_prefix(input)
        .unwrap_or_else(|_| Path::new(source.file_name().unwrap_or(source.as_os_str())));
    let extension = match format {
        OutputFormat::Mdx => "mdx",
        OutputFormat::Json => "json",
    };
    output.join(relative).with_extension(extension)
}

/// Convert every matching page under `input` into `output`.
pub fn process_directory(input: &Path, output: &Path, options: &BatchOptions) -> Result<BatchReport> {
    process_directory_with_progress(input, output, options, |_| {})
}

/// Like [`process_directory`], calling `on_file` after each file.
///
/// With `parallel`, `on_file` runs on worker threads in completion order;
/// the report is still in file-name order.
pub fn process_directory_with_progress<F>(
    input: &Path,
    output: &Path,
    options: &BatchOptions,
    on_file: F,
) -> Result<BatchReport>
where
    F: Fn(&FileOutcome) + Sync,
{
    let sources = collect_sources(input, options)?;
    let registry = ConverterRegistry::with_defaults();

    let run = |source: &PathBuf| {
        let outcome = process_file(&registry, input, output, source, options);
        on_file(&outcome);
        outcome
    };

    let outcomes = if options.parallel {
        sources.par_iter().map(run).collect()
    } else {
        sources.iter().map(run).collect()
    };

    let report = BatchReport { outcomes };
    if options.convert.output_format == OutputFormat::Mdx {
        for dir in full_example_dirs(&report) {
            match write_full_example_index(&dir) {
                Ok(path) => log::debug!("Wrote {}", path.display()),
                Err(e) => log::warn!("Failed to write index in {}: {}", dir.display(), e),
            }
        }
    }
    log::info!(
        "Batch finished: {} converted, {} skipped, {} failed",
        report.converted(),
        report.skipped(),
        report.failed()
    );
    Ok(report)
}

/// Output directories that received at least one full example page.
fn full_example_dirs(report: &BatchReport) -> BTreeSet<PathBuf> {
    report
        .outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            FileOutcome::Converted {
                output,
                kind: DocumentKind::FullExample,
                ..
            } => output.parent().map(Path::to_path_buf),
            _ => None,
        })
        .collect()
}

/// Regenerate the full example index from the headers of the documents in `dir`.
pub fn write_full_example_index(dir: &Path) -> Result<PathBuf> {
    let mut pages = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_page = path.extension().is_some_and(|ext| ext == "mdx")
            && path.file_name().is_some_and(|name| name != INDEX_FILE);
        if !is_page {
            continue;
        }
        let text = fs::read_to_string(&path)?;
        match parse_frontmatter::<FullExampleFrontmatter>(&text) {
            Ok(header) => {
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                pages.push((header.title, stem));
            }
            Err(e) => log::debug!("Not listing {}: {}", path.display(), e),
        }
    }

    let target = dir.join(INDEX_FILE);
    fs::write(&target, full_example_index(&pages)?)?;
    Ok(target)
}

fn process_file(
    registry: &ConverterRegistry,
    input: &Path,
    output: &Path,
    source: &Path,
    options: &BatchOptions,
) -> FileOutcome {
    let target = output_path(input, output, source, options.convert.output_format);

    if target.exists() && !options.force {
        log::debug!("Skipping {}: {} exists", source.display(), target.display());
        return FileOutcome::Skipped {
            input: source.to_path_buf(),
            output: target,
        };
    }

    match registry.convert_to_file(source, &target, &options.convert) {
        Ok(result) => {
            if options.verbose {
                log::info!("{} -> {} ({})", source.display(), target.display(), result.kind);
            }
            FileOutcome::Converted {
                input: source.to_path_buf(),
                output: target,
                kind: result.kind,
                stats: result.stats,
                warnings: result.warnings,
            }
        }
        Err(e) => {
            log::warn!("Failed to convert {}: {}", source.display(), e);
            FileOutcome::Failed {
                input: source.to_path_buf(),
                error: e.to_string(),
            }
        }
    }
}
