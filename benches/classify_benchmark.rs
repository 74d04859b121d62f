//! Benchmarks for outline classification.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pdfoutline::{ClassifierConfig, Fragment, OutlineClassifier};

/// Build a synthetic document: a title, then per page a numbered section,
/// a bold subsection, and several body lines.
fn create_fragments(page_count: u32) -> Vec<Fragment> {
    let mut fragments = vec![Fragment::new("Benchmark Document Title", 28.0, 1, 40.0).bold()];

    for page in 1..=page_count {
        fragments.push(Fragment::new(format!("{} Section {}", page, page), 16.0, page, 80.0));
        fragments.push(Fragment::new(format!("{}.1 Details", page), 13.0, page, 120.0));
        fragments.push(
            Fragment::new(format!("Highlights For Page {}", page), 22.0, page, 160.0).bold(),
        );
        for line in 0..20 {
            fragments.push(Fragment::new(
                "Body text describing the results in plain language.",
                11.0,
                page,
                200.0 + line as f32 * 14.0,
            ));
        }
    }

    fragments
}

/// Benchmark classification at various document sizes.
fn bench_classify(c: &mut Criterion) {
    let classifier = OutlineClassifier::new(ClassifierConfig::default());
    let mut group = c.benchmark_group("classify");

    for page_count in [1, 10, 50].iter() {
        let fragments = create_fragments(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| classifier.classify(black_box(&fragments)));
        });
    }

    group.finish();
}

/// Benchmark a document whose title spans many wrapped lines.
fn bench_title_grouping(c: &mut Criterion) {
    let fragments: Vec<Fragment> = (0..200)
        .map(|i| Fragment::new(format!("Line{}", i), 30.0, 1, i as f32 * 3.0).bold())
        .collect();

    c.bench_function("title_grouping", |b| {
        b.iter(|| pdfoutline::classify(black_box(&fragments)));
    });
}

/// Benchmark configuration parsing.
fn bench_config_parsing(c: &mut Criterion) {
    let json = r#"{"title_size_ratio": 0.85, "excluded_labels": {"extend": ["signature"]}}"#;

    c.bench_function("config_from_json", |b| {
        b.iter(|| ClassifierConfig::from_json(black_box(json)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_classify,
    bench_title_grouping,
    bench_config_parsing,
);
criterion_main!(benches);
