//! Benchmarks for index construction and per-keystroke search.

use cookbuddy_search::{similarity, FuzzyIndex, Record};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const BASES: &[&str] = &[
    "Idli", "Dosa", "Sambar", "Rasam", "Vada", "Pongal", "Upma", "Uttapam", "Appam", "Puttu",
];
const STYLES: &[&str] = &["", "Masala", "Rava", "Ghee", "Onion", "Podi", "Set", "Neer", "Mysore", "Paneer"];

fn create_catalog(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            let base = BASES[i % BASES.len()];
            let style = STYLES[(i / BASES.len()) % STYLES.len()];
            let name = if style.is_empty() {
                format!("{} {}", base, i)
            } else {
                format!("{} {} {}", style, base, i)
            };
            Record::new(name).with_attribute("Salt", "to taste")
        })
        .collect()
}

fn bench_similarity(c: &mut Criterion) {
    c.bench_function("similarity_typo", |b| {
        b.iter(|| similarity(black_box("sambhar"), black_box("Sambar")))
    });

    c.bench_function("similarity_infix", |b| {
        b.iter(|| similarity(black_box("dosa"), black_box("Mysore Masala Dosa")))
    });
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_index");

    for size in [10, 250, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter_with_setup(|| create_catalog(size), |catalog| FuzzyIndex::build(black_box(catalog)))
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let index = FuzzyIndex::build(create_catalog(250));
    let mut group = c.benchmark_group("search_250");

    for (label, query) in [("exact", "Rava Dosa 11"), ("typo", "rava dosaa"), ("miss", "zzzzzzz")] {
        group.bench_function(label, |b| b.iter(|| index.search(black_box(query))));
    }

    group.bench_function("ranked", |b| b.iter(|| index.search_ranked(black_box("dosa"), 5)));

    group.finish();
}

criterion_group!(benches, bench_similarity, bench_build, bench_search);
criterion_main!(benches);
