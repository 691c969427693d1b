//! Criterion benchmarks for the in-memory hot paths
//!
//! Run with: cargo bench
//! Results are saved in target/criterion/ for comparison

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tempfile::TempDir;

use birdnav::core::import::parse_collection;
use birdnav::core::manager::SiteManager;
use birdnav::core::seed::default_categories;
use birdnav::core::types::{count, Collection, NewSite};
use birdnav::storage::LocalStore;

/// The default data repeated until it holds a few hundred sites
fn large_collection() -> Collection {
    (0..10)
        .flat_map(|round| {
            default_categories().into_iter().map(move |mut category| {
                category.id = format!("{}-{}", category.id, round);
                category
            })
        })
        .collect()
}

/// Benchmark search over a local manager
fn bench_search(c: &mut Criterion) {
    let temp = TempDir::new().unwrap();
    let manager = SiteManager::open_local(LocalStore::new(temp.path()), large_collection());

    c.bench_function("search_common_term", |b| {
        b.iter(|| black_box(manager.search(black_box("javascript")).len()))
    });

    c.bench_function("search_no_match", |b| {
        b.iter(|| black_box(manager.search(black_box("zzz-nothing")).len()))
    });
}

/// Benchmark import validation and decoding
fn bench_import(c: &mut Criterion) {
    let json = serde_json::to_string_pretty(&large_collection()).unwrap();

    c.bench_function("import_parse_large", |b| {
        b.iter(|| parse_collection(black_box(&json)).unwrap())
    });

    let mut invalid: serde_json::Value = serde_json::from_str(&json).unwrap();
    invalid[39]["icon"] = serde_json::Value::Null;
    let invalid = invalid.to_string();

    c.bench_function("import_reject_last_element", |b| {
        b.iter(|| parse_collection(black_box(&invalid)).is_err())
    });
}

/// Benchmark derived statistics
fn bench_stats(c: &mut Criterion) {
    let categories = large_collection();
    c.bench_function("count_large", |b| b.iter(|| count(black_box(&categories))));

    let temp = TempDir::new().unwrap();
    let manager = SiteManager::open_local(LocalStore::new(temp.path()), large_collection());
    c.bench_function("stats_large", |b| b.iter(|| black_box(manager.stats())));
}

/// Benchmark a local mutation including the write to the local slot
fn bench_local_add_site(c: &mut Criterion) {
    let temp = TempDir::new().unwrap();
    let mut manager = SiteManager::open_local(LocalStore::new(temp.path()), default_categories());

    c.bench_function("local_add_site", |b| {
        b.iter(|| {
            tokio_test::block_on(manager.add_site(
                "tools",
                NewSite {
                    name: "Bench".to_string(),
                    url: "https://bench.example.com".to_string(),
                    ..Default::default()
                },
            ))
        })
    });
}

criterion_group!(
    benches,
    bench_search,
    bench_import,
    bench_stats,
    bench_local_add_site,
);

criterion_main!(benches);
