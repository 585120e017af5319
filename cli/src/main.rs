//! isbdm-mdx CLI - legacy ISBDM HTML to MDX conversion tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use isbdm_mdx::batch::{collect_sources, process_directory_with_progress, DEFAULT_EXCLUDE};
use isbdm_mdx::verify::{self, Completeness, CompletenessReport, Thresholds};
use isbdm_mdx::{
    BatchOptions, CleanupOptions, CleanupPreset, ConvertOptions, ConverterRegistry,
    DocumentKind, FileOutcome, JsonFormat, Namespaces, ParseOptions, RenderOptions,
};

#[derive(Parser)]
#[command(name = "isbdm-mdx")]
#[command(author = "ISBDM documentation team")]
#[command(version)]
#[command(about = "Convert legacy ISBDM HTML pages to frontmatter + MDX", long_about = None)]
struct Cli {
    /// Log each file (sets the default log level to info)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a single page
    Convert {
        /// Input HTML page
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        #[command(flatten)]
        options: ConvertArgs,
    },

    /// Convert every page in a directory
    Batch {
        /// Input directory
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Output directory
        #[arg(value_name = "OUTPUT_DIR")]
        output: PathBuf,

        /// File-name glob of pages to convert
        #[arg(long, default_value = "*.html")]
        pattern: String,

        /// Regex of file names to skip
        #[arg(long, default_value = DEFAULT_EXCLUDE)]
        exclude: String,

        /// Overwrite existing outputs
        #[arg(short, long)]
        force: bool,

        /// Walk sub-directories, mirroring them in the output
        #[arg(short, long)]
        recursive: bool,

        /// Convert files in parallel
        #[arg(short, long)]
        parallel: bool,

        #[command(flatten)]
        options: ConvertArgs,
    },

    /// Check converted documents against their sources
    Verify {
        /// Source page or directory
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        /// Converted document or directory
        #[arg(value_name = "CONVERTED")]
        converted: PathBuf,

        /// Ratio below which a document is incomplete
        #[arg(long, default_value_t = 0.5)]
        incomplete: f64,

        /// Ratio below which a document is partial
        #[arg(long, default_value_t = 0.9)]
        partial: f64,

        /// Print the reports as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Check the concept lists of converted vocabularies
    CheckVocabulary {
        /// Directory of converted documents
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Directory of source pages to compare terms against
        #[arg(long, value_name = "DIR")]
        source: Option<PathBuf>,
    },

    /// Dump the extracted document model as JSON
    Inspect {
        /// Input HTML page
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Force the document kind
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },

    /// Show version information
    Version,
}

/// Options shared by the converting commands.
#[derive(Args)]
struct ConvertArgs {
    /// Force the document kind instead of detecting it
    #[arg(long, value_enum)]
    kind: Option<KindArg>,

    /// Embed the RDF map in the element reference marker
    #[arg(long)]
    inline_metadata: bool,

    /// Compact header URIs into prefixed names
    #[arg(long)]
    compact_uris: bool,

    /// Use the file stem when a page has no title
    #[arg(long)]
    lenient: bool,

    /// sidebar_position of element documents
    #[arg(long, default_value_t = 1)]
    sidebar_position: u32,

    /// Text cleanup preset
    #[arg(long, value_enum)]
    cleanup: Option<CleanupLevel>,

    /// Element namespace URI
    #[arg(long, env = "ISBDM_ELEMENT_NAMESPACE", default_value = isbdm_mdx::model::ELEMENT_NAMESPACE)]
    element_namespace: String,

    /// Vocabulary namespace URI
    #[arg(long, env = "ISBDM_VALUES_NAMESPACE", default_value = isbdm_mdx::model::VALUES_NAMESPACE)]
    values_namespace: String,
}

impl ConvertArgs {
    fn to_options(&self) -> ConvertOptions {
        let mut parse = ParseOptions::new().with_namespaces(Namespaces::new(
            self.element_namespace.clone(),
            self.values_namespace.clone(),
        ));
        if self.lenient {
            parse = parse.lenient();
        }

        let mut render = RenderOptions::new()
            .with_inline_metadata(self.inline_metadata)
            .with_compact_uris(self.compact_uris)
            .with_sidebar_position(self.sidebar_position);
        if let Some(level) = self.cleanup {
            render = render.with_cleanup(CleanupOptions::from_preset(level.into()));
        }

        let mut options = ConvertOptions::new()
            .with_parse_options(parse)
            .with_render_options(render);
        if let Some(kind) = self.kind {
            options = options.with_kind(kind.into());
        }
        options
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum KindArg {
    /// Element definition page
    Element,
    /// Controlled vocabulary page
    Vocabulary,
    /// String encoding scheme page
    Ses,
    /// Full example page
    #[value(name = "fullex")]
    FullExample,
    /// General information page
    General,
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Element => DocumentKind::Element,
            KindArg::Vocabulary => DocumentKind::Vocabulary,
            KindArg::Ses => DocumentKind::Ses,
            KindArg::FullExample => DocumentKind::FullExample,
            KindArg::General => DocumentKind::General,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Minimal cleanup (Unicode normalization only)
    Minimal,
    /// Standard cleanup (default)
    Standard,
}

impl From<CleanupLevel> for CleanupPreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => CleanupPreset::Minimal,
            CleanupLevel::Standard => CleanupPreset::Standard,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            options,
        } => cmd_convert(&input, output.as_deref(), &options),
        Commands::Batch {
            input,
            output,
            pattern,
            exclude,
            force,
            recursive,
            parallel,
            options,
        } => {
            let batch = BatchOptions::new()
                .with_pattern(pattern)
                .with_exclude(exclude)
                .with_force(force)
                .with_recursive(recursive)
                .with_parallel(parallel)
                .with_verbose(cli.verbose)
                .with_convert_options(options.to_options());
            cmd_batch(&input, &output, &batch)
        }
        Commands::Verify {
            source,
            converted,
            incomplete,
            partial,
            json,
        } => {
            let thresholds = Thresholds::new()
                .with_incomplete(incomplete)
                .with_partial(partial);
            cmd_verify(&source, &converted, &thresholds, json)
        }
        Commands::CheckVocabulary { dir, source } => cmd_check_vocabulary(&dir, source.as_deref()),
        Commands::Inspect {
            input,
            output,
            compact,
            kind,
        } => cmd_inspect(&input, output.as_deref(), compact, kind),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    args: &ConvertArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let registry = ConverterRegistry::with_defaults();
    let options = args.to_options();

    match output {
        Some(path) => {
            let result = registry.convert_to_file(input, path, &options)?;
            for warning in &result.warnings {
                println!("{} {}", "Warning:".yellow(), warning);
            }
            println!(
                "{} {} ({}, {} bytes)",
                "Saved to".green(),
                path.display(),
                result.kind,
                result.content_len()
            );
        }
        None => {
            let result = registry.convert(input, &options)?;
            print!("{}", result.content);
        }
    }

    Ok(())
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    options: &BatchOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let total = collect_sources(input, options)?.len();
    println!(
        "{} {} files from {}",
        "Converting".cyan().bold(),
        total,
        input.display()
    );

    let pb = if options.verbose {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(total as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let report = process_directory_with_progress(input, output, options, |outcome| {
        if let Some(name) = outcome.input().file_name() {
            pb.set_message(name.to_string_lossy().into_owned());
        }
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    for outcome in &report.outcomes {
        match outcome {
            FileOutcome::Converted {
                input, warnings, ..
            } if options.verbose || !warnings.is_empty() => {
                println!("{} {}", "✓".green(), input.display());
                for warning in warnings {
                    println!("    {} {}", "Warning:".yellow(), warning);
                }
            }
            FileOutcome::Skipped { input, .. } if options.verbose => {
                println!("{} {} (exists)", "-".dimmed(), input.display());
            }
            FileOutcome::Failed { input, error } => {
                println!("{} {}: {}", "✗".red(), input.display(), error);
            }
            _ => {}
        }
    }

    let stats = report.total_stats();
    println!();
    println!("{}", "Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Converted".bold(), report.converted());
    println!("{}: {}", "Skipped".bold(), report.skipped());
    println!("{}: {}", "Failed".bold(), report.failed());
    println!("{}: {}", "Concepts".bold(), stats.concept_count);
    println!("{}: {}", "Example groups".bold(), stats.example_group_count);

    if !report.is_success() {
        return Err(format!("{} of {} files failed", report.failed(), report.total()).into());
    }
    println!("\n{}", "Done!".green().bold());
    Ok(())
}

fn cmd_verify(
    source: &Path,
    converted: &Path,
    thresholds: &Thresholds,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let reports = if source.is_dir() {
        verify::verify_directory(source, converted, thresholds)?
    } else {
        vec![verify::verify_file(source, converted, thresholds)?]
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print_report_table(&reports);
    }

    let failed = reports.iter().filter(|r| r.status.is_failure()).count();
    if failed > 0 {
        return Err(format!("{} documents failed verification", failed).into());
    }
    Ok(())
}

fn print_report_table(reports: &[CompletenessReport]) {
    println!("{}", "Conversion Completeness Report".cyan().bold());
    println!();
    println!("| File | Status | Details | Source P/LI | MDX P/LI | Similarity |");
    println!("|------|--------|---------|-------------|----------|------------|");
    for report in reports {
        print_report_row(report);
    }

    let count = |status: Completeness| reports.iter().filter(|r| r.status == status).count();
    println!("\n{}", "Summary:".bold());
    for status in [
        Completeness::Incomplete,
        Completeness::Partial,
        Completeness::Complete,
        Completeness::Missing,
    ] {
        println!("- {}: {}", status, count(status));
    }
    println!("- TOTAL: {}", reports.len());
}

fn print_report_row(report: &CompletenessReport) {
    let status = match report.status {
        Completeness::Complete => report.status.as_str().green(),
        Completeness::Partial => report.status.as_str().yellow(),
        Completeness::Incomplete | Completeness::Missing => report.status.as_str().red(),
    };
    let converted = report
        .converted
        .map(|c| c.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let similarity = report
        .similarity
        .map(|s| format!("{}%", s))
        .unwrap_or_else(|| "N/A".to_string());

    println!(
        "| {} | {} | {} | {} | {} | {} |",
        report.name,
        status,
        report.details(),
        report.source,
        converted,
        similarity
    );
}

fn cmd_check_vocabulary(dir: &Path, source: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let reports = verify::check_vocabulary_directory(dir)?;
    let mut problems = 0;

    println!("{}", "Vocabulary Integrity".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for report in &reports {
        let name = report
            .path
            .strip_prefix(dir)
            .unwrap_or(&report.path)
            .display()
            .to_string();

        let comparison = match source {
            Some(source_dir) => {
                let page = source_dir.join(&name).with_extension("html");
                if page.is_file() {
                    Some(verify::compare_vocabulary(&page, &report.path)?)
                } else {
                    None
                }
            }
            None => None,
        };
        let terms_match = comparison.as_ref().map_or(true, |c| c.is_match());

        if report.is_valid() && terms_match {
            println!("{} {} ({} concepts)", "✓".green(), name, report.concept_count);
            continue;
        }

        problems += 1;
        println!("{} {} ({} concepts)", "✗".red(), name, report.concept_count);
        for issue in &report.issues {
            println!("    {}", issue);
        }
        if let Some(c) = comparison.filter(|c| !c.is_match()) {
            if !c.missing.is_empty() {
                println!("    Missing terms: {}", c.missing.join(", "));
            }
            if !c.extra.is_empty() {
                println!("    Extra terms: {}", c.extra.join(", "));
            }
            if !c.mismatched.is_empty() {
                println!("    Changed definitions: {}", c.mismatched.join(", "));
            }
        }
    }

    println!(
        "\n{}: {} vocabularies, {} with problems",
        "Summary".bold(),
        reports.len(),
        problems
    );

    if problems > 0 {
        return Err(format!("{} vocabularies have problems", problems).into());
    }
    Ok(())
}

fn cmd_inspect(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    kind: Option<KindArg>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = ConvertOptions::new().with_parse_options(ParseOptions::new().lenient());
    if let Some(kind) = kind {
        options = options.with_kind(kind.into());
    }
    let doc = isbdm_mdx::extract_file_with_options(input, &options)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = isbdm_mdx::render::to_json(&doc, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "isbdm-mdx".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Legacy ISBDM HTML to MDX conversion tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PAGE: &str = r#"<div class="col-md-7"><h3>Has title</h3>
        <div class="row"><div class="elref">Definition</div><div class="eltext">Relates a title.</div></div></div>"#;

    fn convert_args(args: &[&str]) -> ConvertArgs {
        let mut argv = vec!["isbdm-mdx", "convert", "in.html"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Convert { options, .. } => options,
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_convert_args_defaults() {
        let options = convert_args(&[]).to_options();
        assert_eq!(options.kind, None);
        assert_eq!(options.render.sidebar_position, 1);
        assert!(!options.render.inline_metadata);
        assert_eq!(
            options.parse.namespaces.elements,
            isbdm_mdx::model::ELEMENT_NAMESPACE
        );
    }

    #[test]
    fn test_convert_args_flags() {
        let options = convert_args(&[
            "--kind",
            "vocabulary",
            "--inline-metadata",
            "--lenient",
            "--sidebar-position",
            "4",
            "--cleanup",
            "minimal",
        ])
        .to_options();
        assert_eq!(options.kind, Some(DocumentKind::Vocabulary));
        assert!(options.render.inline_metadata);
        assert!(options.parse.is_lenient());
        assert_eq!(options.render.sidebar_position, 4);
        assert_eq!(options.render.cleanup, Some(CleanupOptions::minimal()));
    }

    #[test]
    fn test_convert_args_page_kinds() {
        let options = convert_args(&["--kind", "fullex"]).to_options();
        assert_eq!(options.kind, Some(DocumentKind::FullExample));
        let options = convert_args(&["--kind", "general"]).to_options();
        assert_eq!(options.kind, Some(DocumentKind::General));
    }

    #[test]
    fn test_batch_default_exclude() {
        let cli = Cli::try_parse_from(["isbdm-mdx", "batch", "in", "out", "-f"]).unwrap();
        match cli.command {
            Commands::Batch { exclude, force, pattern, .. } => {
                assert_eq!(exclude, DEFAULT_EXCLUDE);
                assert_eq!(pattern, "*.html");
                assert!(force);
            }
            _ => panic!("expected batch"),
        }
    }

    #[test]
    fn test_cmd_convert_writes_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("1001.html");
        let output = dir.path().join("docs/1001.mdx");
        fs::write(&input, PAGE).unwrap();

        cmd_convert(&input, Some(output.as_path()), &convert_args(&[])).unwrap();
        let mdx = fs::read_to_string(&output).unwrap();
        assert!(mdx.starts_with("---\nid: '1001'\n"));
    }

    #[test]
    fn test_cmd_verify_fails_on_missing() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("1001.html");
        fs::write(&input, PAGE).unwrap();

        let result = cmd_verify(
            &input,
            &dir.path().join("1001.mdx"),
            &Thresholds::default(),
            true,
        );
        assert!(result.is_err());
    }
}
