//! Integration tests for directory conversion.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use isbdm_mdx::batch::{process_directory, BatchOptions, FileOutcome};
use isbdm_mdx::DocumentKind;

fn element_page(index: usize) -> String {
    format!(
        r#"<html><body><div class="col-md-7">
        <h3>Has test element {index}</h3>
        <div class="row"><div class="col elref">Definition</div><div class="col eltext">Relates a manifestation to test value {index}.</div></div>
        <h4>Element values</h4>
        <div class="guid"><p>Record value {index}.</p><ul><li>first</li><li>second</li></ul></div>
        </div></body></html>"#
    )
}

/// Ten element pages `1001.html`..`1010.html`; `1007.html` is empty.
fn ten_pages_one_empty(dir: &Path) {
    for i in 1..=10 {
        let content = if i == 7 { String::new() } else { element_page(i) };
        fs::write(dir.join(format!("{}.html", 1000 + i)), content).unwrap();
    }
}

#[test]
fn test_one_empty_file_does_not_abort_batch() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    ten_pages_one_empty(input.path());

    let report = process_directory(input.path(), output.path(), &BatchOptions::default()).unwrap();

    assert_eq!(report.total(), 10);
    assert_eq!(report.converted(), 9);
    assert_eq!(report.failed(), 1);
    assert!(!report.is_success());

    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].0.ends_with("1007.html"));
    assert!(failures[0].1.contains("empty"));

    for i in (1..=10).filter(|i| *i != 7) {
        let out = output.path().join(format!("{}.mdx", 1000 + i));
        let content = fs::read_to_string(&out).unwrap();
        assert!(!content.trim().is_empty());
        assert!(content.starts_with(&format!("---\nid: '{}'\n", 1000 + i)));
    }
    assert!(!output.path().join("1007.mdx").exists());
}

#[test]
fn test_outcomes_in_file_name_order() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    ten_pages_one_empty(input.path());

    let options = BatchOptions::new().with_parallel(true);
    let report = process_directory(input.path(), output.path(), &options).unwrap();

    let names: Vec<String> = report
        .outcomes
        .iter()
        .map(|o| o.input().file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
    assert_eq!(report.converted(), 9);
}

#[test]
fn test_second_run_skips_existing() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    ten_pages_one_empty(input.path());

    process_directory(input.path(), output.path(), &BatchOptions::default()).unwrap();
    let target = output.path().join("1001.mdx");
    fs::write(&target, "hand edited\n").unwrap();

    let report = process_directory(input.path(), output.path(), &BatchOptions::default()).unwrap();
    assert_eq!(report.converted(), 0);
    assert_eq!(report.skipped(), 9);
    assert_eq!(report.failed(), 1);
    assert_eq!(fs::read_to_string(&target).unwrap(), "hand edited\n");
}

#[test]
fn test_force_rerun_is_idempotent() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    ten_pages_one_empty(input.path());
    let options = BatchOptions::new().with_force(true);

    process_directory(input.path(), output.path(), &options).unwrap();
    let first: Vec<String> = (1..=10)
        .filter(|i| *i != 7)
        .map(|i| fs::read_to_string(output.path().join(format!("{}.mdx", 1000 + i))).unwrap())
        .collect();

    let report = process_directory(input.path(), output.path(), &options).unwrap();
    assert_eq!(report.converted(), 9);
    let second: Vec<String> = (1..=10)
        .filter(|i| *i != 7)
        .map(|i| fs::read_to_string(output.path().join(format!("{}.mdx", 1000 + i))).unwrap())
        .collect();

    assert_eq!(first, second);
}

#[test]
fn test_pattern_and_exclude() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("1001.html"), element_page(1)).unwrap();
    fs::write(input.path().join("2001.html"), element_page(2)).unwrap();
    fs::write(input.path().join("index.html"), element_page(3)).unwrap();
    fs::write(input.path().join("notes.txt"), "not a page").unwrap();

    let report = process_directory(input.path(), output.path(), &BatchOptions::default()).unwrap();
    assert_eq!(report.total(), 2);

    let options = BatchOptions::new().with_pattern("1*.html");
    let report = process_directory(input.path(), output.path(), &options).unwrap();
    assert_eq!(report.total(), 1);

    let options = BatchOptions::new().without_exclude().with_force(true);
    let report = process_directory(input.path(), output.path(), &options).unwrap();
    assert_eq!(report.total(), 3);
}

#[test]
fn test_forced_kind_and_stats() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("1001.html"), element_page(1)).unwrap();
    fs::write(input.path().join("1002.html"), element_page(2)).unwrap();

    let options = BatchOptions::new().with_kind(DocumentKind::Element);
    let report = process_directory(input.path(), output.path(), &options).unwrap();

    assert!(report.is_success());
    for outcome in &report.outcomes {
        match outcome {
            FileOutcome::Converted { kind, stats, .. } => {
                assert_eq!(*kind, DocumentKind::Element);
                assert_eq!(stats.paragraph_count, 1);
                assert_eq!(stats.list_item_count, 2);
            }
            other => panic!("unexpected outcome for {}", other.input().display()),
        }
    }
    let total = report.total_stats();
    assert_eq!(total.paragraph_count, 2);
    assert_eq!(total.list_item_count, 4);
}
