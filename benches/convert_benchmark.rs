//! Benchmarks for page conversion.
//!
//! Run with: cargo bench
//!
//! These benchmarks convert synthetic element and vocabulary pages.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::path::Path;

/// Creates an element page with the given number of example groups.
fn create_element_page(example_count: usize) -> String {
    let mut html = String::from(
        r#"<html><body><div class="container"><div class="col-md-7">
<h3>Has extent of manifestation</h3>
<div class="row"><div class="col-2 elref">Definition</div><div class="col eltext">Relates a manifestation to a number and type of units.</div></div>
<div class="row"><div class="col-2 elref">Domain</div><div class="col eltext">Manifestation</div></div>
<div class="row"><div class="col-2 elref">Range</div><div class="col eltext">Literal</div></div>
<h4>Stipulations</h4>
<div class="stip"><p>Record the extent of the manifestation.</p>
<div class="xampleBlockStip"><div class="xamples">
"#,
    );

    for i in 0..example_count {
        // Every group appears twice, the second copy with a cut-off annotation.
        for _ in 0..2 {
            html.push_str(&format!(
                r#"<div><div class="row"><div class="xampleLabel">Has extent of manifestation</div><div class="xampleValue">{} volumes</div></div>
<div class="editComment">[Example {} of a multi-volume set.]</div></div>
<div><div class="editComment">[Example {} of</div></div>
"#,
                i + 1,
                i + 1,
                i + 1
            ));
        }
    }

    html.push_str(
        r#"</div></div></div>
<h5>Transcription</h5>
<div class="guid"><ol><li>Count the volumes.</li><li>Record the number.</li></ol></div>
</div></div></body></html>"#,
    );
    html
}

/// Creates a vocabulary page with the given number of concepts.
fn create_vocabulary_page(concept_count: usize) -> String {
    let mut html = String::from(
        r#"<html><body><div class="col-md-7">
<h3>Unit of extent</h3>
<div class="guid"><p>Terms for units of extent.</p></div>
"#,
    );
    for i in 0..concept_count {
        html.push_str(&format!(
            r#"<div class="row"><div class="col vesValue"><p>unit {i}</p></div><div class="col"><p>Definition of unit {i}.</p></div></div>
"#
        ));
    }
    html.push_str("</div></body></html>");
    html
}

/// Benchmark kind detection.
fn bench_kind_detection(c: &mut Criterion) {
    let element = create_element_page(1);
    let vocabulary = create_vocabulary_page(1);

    c.bench_function("detect_element", |b| {
        b.iter(|| isbdm_mdx::detect_kind(Path::new("1024.html"), black_box(&element)).unwrap());
    });

    c.bench_function("detect_vocabulary", |b| {
        b.iter(|| isbdm_mdx::detect_kind(Path::new("1275.html"), black_box(&vocabulary)).unwrap());
    });
}

/// Benchmark element conversion at various sizes.
fn bench_element_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("element_conversion");
    let options = isbdm_mdx::ConvertOptions::default();

    for example_count in [1, 10, 50].iter() {
        let html = create_element_page(*example_count);

        group.bench_function(format!("{}_examples", example_count), |b| {
            b.iter(|| {
                isbdm_mdx::convert_str(black_box(&html), Path::new("1024.html"), &options).unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark vocabulary conversion.
fn bench_vocabulary_conversion(c: &mut Criterion) {
    let html = create_vocabulary_page(100);
    let options = isbdm_mdx::ConvertOptions::default();

    c.bench_function("vocabulary_100_concepts", |b| {
        b.iter(|| isbdm_mdx::convert_str(black_box(&html), Path::new("1275.html"), &options).unwrap());
    });
}

/// Benchmark builder pattern overhead.
fn bench_builder_creation(c: &mut Criterion) {
    c.bench_function("builder_creation", |b| {
        b.iter(|| {
            let _builder = isbdm_mdx::IsbdmMdx::new()
                .lenient()
                .with_inline_metadata()
                .with_cleanup(isbdm_mdx::CleanupPreset::Standard);
        });
    });
}

criterion_group!(
    benches,
    bench_kind_detection,
    bench_element_conversion,
    bench_vocabulary_conversion,
    bench_builder_creation,
);
criterion_main!(benches);
