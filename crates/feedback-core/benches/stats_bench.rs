//! # Aggregation Benchmarks
//!
//! Run with: `cargo bench -p feedback-core`

use chrono::{DateTime, Duration, Utc};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use feedback_core::{RecordStore, StatsSnapshot, Submission, ValidationGate, course_breakdown};
use std::hint::black_box;

fn base_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_760_000_000, 0).expect("valid timestamp")
}

/// Build a store with `size` records spread over 50 courses and 30 days.
fn create_store(size: usize) -> RecordStore {
    let mut store = RecordStore::new();
    for i in 0..size {
        let score = (i % 5) as i64 + 1;
        let submission = Submission::new(
            format!("Student {i}"),
            format!("CS{}", i % 50),
            "Benchmark comment",
            score,
            6 - score,
            3,
        );
        let payload = ValidationGate::check(&submission).expect("valid");
        let at = base_time() - Duration::hours((i % 720) as i64);
        store.insert_at(payload, at).expect("insert");
    }
    store
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("stats_snapshot");

    for size in [100, 1000, 10000].iter() {
        let store = create_store(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &store, |b, store| {
            b.iter(|| black_box(StatsSnapshot::from_store(store, base_time())));
        });
    }

    group.finish();
}

fn bench_course_breakdown(c: &mut Criterion) {
    let mut group = c.benchmark_group("course_breakdown");

    for size in [100, 1000, 10000].iter() {
        let store = create_store(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &store, |b, store| {
            b.iter(|| black_box(course_breakdown(store.all())));
        });
    }

    group.finish();
}

fn bench_validation(c: &mut Criterion) {
    let submission = Submission::new("  Ada Lovelace ", " cs101 ", " Thorough notes ", 4, 5, 3);
    c.bench_function("validation_gate", |b| {
        b.iter(|| black_box(ValidationGate::check(black_box(&submission))));
    });
}

criterion_group!(
    benches,
    bench_snapshot,
    bench_course_breakdown,
    bench_validation
);
criterion_main!(benches);
