//! Benchmarks for aggregation hot paths.
//!
//! Run with: cargo bench -p moodboard-core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use moodboard_core::aggregate::shuffle_truncate;
use moodboard_core::{Aggregator, Config, ImageRecord, PlaceholderGenerator};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn benchmark_placeholders(c: &mut Criterion) {
    let generator = PlaceholderGenerator::default();

    c.bench_function("placeholders_default", |b| {
        b.iter(|| generator.placeholders_default(black_box("sunset beach minimal")))
    });
}

fn benchmark_shuffle_truncate(c: &mut Criterion) {
    let records: Vec<ImageRecord> = (0..20)
        .map(|i| ImageRecord::new(format!("id-{i}"), format!("https://cdn.test/{i}.jpg"), "Pexels"))
        .collect();
    let mut rng = StdRng::seed_from_u64(42);

    c.bench_function("shuffle_truncate_20_to_12", |b| {
        b.iter(|| shuffle_truncate(black_box(records.clone()), 12, &mut rng))
    });
}

fn benchmark_aggregate_offline(c: &mut Criterion) {
    // Blank credentials: every call resolves to placeholders without I/O
    let mut config = Config::default();
    config.sources.pexels.api_key = String::new();
    config.sources.pinterest.api_key = String::new();
    let aggregator = Aggregator::from_config(&config);
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("aggregate_unconfigured", |b| {
        b.iter(|| rt.block_on(aggregator.aggregate(black_box("sunset beach"))))
    });
}

criterion_group!(
    benches,
    benchmark_placeholders,
    benchmark_shuffle_truncate,
    benchmark_aggregate_offline
);
criterion_main!(benches);
