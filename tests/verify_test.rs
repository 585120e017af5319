//! Integration tests for verification of converted documents.

use std::fs;
use tempfile::TempDir;

use isbdm_mdx::verify::{
    check_vocabulary_directory, compare_vocabulary, verify_directory, verify_file, Completeness,
    IntegrityIssue, Thresholds,
};
use isbdm_mdx::{convert_file, ConvertOptions, ConverterRegistry};

/// Element page with `count` guidance paragraphs.
fn source_page(count: usize) -> String {
    let paragraphs: String = (1..=count)
        .map(|i| format!("<p>Guidance paragraph number {} about recording values.</p>\n", i))
        .collect();
    format!(
        r#"<html><body><div class="col-md-7">
        <h3>Has test element</h3>
        <div class="row"><div class="col elref">Definition</div><div class="col eltext">Relates a test.</div></div>
        <h4>Additional information</h4>
        <div class="guid">{}</div>
        </div></body></html>"#,
        paragraphs
    )
}

/// Converted document with `count` markdown paragraphs.
fn converted_doc(id: &str, count: usize) -> String {
    let mut text = format!("---\nid: '{}'\ntitle: Has test element\n---\n\n# Has test element\n\n", id);
    for i in 1..=count {
        text.push_str(&format!(
            "Guidance paragraph number {} about recording values.\n\n",
            i
        ));
    }
    text
}

const VOCABULARY: &str = r#"<html><body><div class="col-md-7">
  <h3>Colour content</h3>
  <div class="guid"><p>Terms for the colour content of a manifestation.</p></div>
  <div class="row"><div class="col vesValue"><p>black and white</p></div><div class="col"><p>Black and white only.</p></div></div>
  <div class="row"><div class="col vesValue"><p>colour</p></div><div class="col"><p>Two or more colours.</p></div></div>
</div></body></html>"#;

#[test]
fn test_verify_directory_classes_and_order() {
    let source = TempDir::new().unwrap();
    let converted = TempDir::new().unwrap();

    fs::write(source.path().join("1001.html"), source_page(20)).unwrap();
    fs::write(converted.path().join("1001.mdx"), converted_doc("1001", 20)).unwrap();

    fs::write(source.path().join("1002.html"), source_page(20)).unwrap();
    fs::write(converted.path().join("1002.mdx"), converted_doc("1002", 5)).unwrap();

    fs::write(source.path().join("1003.html"), source_page(4)).unwrap();

    fs::write(source.path().join("1004.html"), source_page(20)).unwrap();
    fs::write(converted.path().join("1004.mdx"), converted_doc("1004", 15)).unwrap();

    let reports = verify_directory(source.path(), converted.path(), &Thresholds::default()).unwrap();
    let summary: Vec<(&str, Completeness)> =
        reports.iter().map(|r| (r.name.as_str(), r.status)).collect();

    assert_eq!(
        summary,
        vec![
            ("1002", Completeness::Incomplete),
            ("1004", Completeness::Partial),
            ("1001", Completeness::Complete),
            ("1003", Completeness::Missing),
        ]
    );

    let complete = &reports[2];
    assert_eq!(complete.source.paragraphs, 20);
    assert_eq!(complete.converted.map(|c| c.paragraphs), Some(20));
    assert_eq!(complete.details(), "All content present (100% of source)");
    assert!(complete.similarity_passes());

    let incomplete = &reports[0];
    assert_eq!(incomplete.details(), "Significantly less content (25% of source)");

    let missing = &reports[3];
    assert!(missing.converted.is_none());
    assert!(missing.status.is_failure());
}

#[test]
fn test_custom_thresholds() {
    let source = TempDir::new().unwrap();
    let converted = TempDir::new().unwrap();
    let html = source.path().join("1001.html");
    let mdx = converted.path().join("1001.mdx");
    fs::write(&html, source_page(20)).unwrap();
    fs::write(&mdx, converted_doc("1001", 15)).unwrap();

    let strict = Thresholds::new().with_incomplete(0.8).with_partial(0.95);
    let report = verify_file(&html, &mdx, &strict).unwrap();
    assert_eq!(report.status, Completeness::Incomplete);

    let loose = Thresholds::new().with_partial(0.7);
    let report = verify_file(&html, &mdx, &loose).unwrap();
    assert_eq!(report.status, Completeness::Complete);
}

#[test]
fn test_real_conversion_is_complete() {
    let source = TempDir::new().unwrap();
    let converted = TempDir::new().unwrap();
    let html = source.path().join("1001.html");
    let mdx = converted.path().join("1001.mdx");
    fs::write(&html, source_page(12)).unwrap();

    ConverterRegistry::with_defaults()
        .convert_to_file(&html, &mdx, &ConvertOptions::default())
        .unwrap();

    let report = verify_file(&html, &mdx, &Thresholds::default()).unwrap();
    assert_eq!(report.status, Completeness::Complete);
    assert!(report.similarity_passes());
}

#[test]
fn test_check_vocabulary_directory() {
    let dir = TempDir::new().unwrap();
    let html = dir.path().join("1275.html");
    fs::write(&html, VOCABULARY).unwrap();
    let out = dir.path().join("out");
    fs::create_dir_all(out.join("ves")).unwrap();

    fs::write(out.join("ves/1275.mdx"), convert_file(&html).unwrap()).unwrap();
    fs::write(out.join("1025.mdx"), converted_doc("1025", 2)).unwrap();
    fs::write(
        out.join("ves/1276.mdx"),
        "---\nid: '1276'\ntitle: Broken\nconcepts:\n- value: black\n  definition: Dark.\n- value: black\n  definition: Also dark.\n- value: ''\n  definition: Nothing.\n---\n",
    )
    .unwrap();

    let reports = check_vocabulary_directory(&out).unwrap();
    assert_eq!(reports.len(), 2);

    let converted = &reports[0];
    assert!(converted.path.ends_with("ves/1275.mdx"));
    assert_eq!(converted.concept_count, 2);
    assert!(converted.is_valid());

    let broken = &reports[1];
    assert!(broken.path.ends_with("ves/1276.mdx"));
    assert!(!broken.is_valid());
    assert!(broken.issues.contains(&IntegrityIssue::MissingValue(2)));
    assert!(broken
        .issues
        .contains(&IntegrityIssue::Duplicates(vec!["black".to_string()])));
}

#[test]
fn test_compare_vocabulary() {
    let dir = TempDir::new().unwrap();
    let html = dir.path().join("1275.html");
    let mdx = dir.path().join("1275.mdx");
    fs::write(&html, VOCABULARY).unwrap();
    fs::write(&mdx, convert_file(&html).unwrap()).unwrap();

    let comparison = compare_vocabulary(&html, &mdx).unwrap();
    assert!(comparison.is_match());

    let edited = mdx.with_file_name("1275-edited.mdx");
    fs::write(
        &edited,
        "---\nid: '1275'\nconcepts:\n- value: colour\n  definition: Many colours.\n- value: monochrome\n  definition: One colour.\n---\n",
    )
    .unwrap();
    let comparison = compare_vocabulary(&html, &edited).unwrap();
    assert_eq!(comparison.missing, vec!["black and white"]);
    assert_eq!(comparison.mismatched, vec!["colour"]);
    assert_eq!(comparison.extra, vec!["monochrome"]);
    assert!(!comparison.is_match());
}
