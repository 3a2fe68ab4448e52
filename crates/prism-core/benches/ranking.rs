//! Benchmarks for the Prism ranking pipeline.
//!
//! Run with: cargo bench -p prism-core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use prism_core::ranking::{selection, ScoringEngine};
use prism_core::types::ScoredCandidate;

const DIM: usize = 1280;

fn synthetic_vector(seed: u32) -> Vec<f32> {
    (0..DIM)
        .map(|i| ((seed.wrapping_mul(2654435761).wrapping_add(i as u32) % 1000) as f32) / 1000.0)
        .collect()
}

fn benchmark_score_hybrid(c: &mut Criterion) {
    let candidate = synthetic_vector(1);
    let preference = synthetic_vector(2);
    let current = synthetic_vector(3);

    c.bench_function("score_hybrid", |b| {
        b.iter(|| {
            let _ = ScoringEngine::score(
                black_box(&candidate),
                black_box("golden retriever"),
                black_box("labrador retriever"),
                black_box(Some(preference.as_slice())),
                black_box(Some(current.as_slice())),
            );
        })
    });
}

fn benchmark_score_keyword_only(c: &mut Criterion) {
    let candidate = synthetic_vector(1);

    c.bench_function("score_keyword_only", |b| {
        b.iter(|| {
            let _ = ScoringEngine::score(
                black_box(&candidate),
                black_box("golden retriever"),
                black_box("labrador retriever"),
                None,
                None,
            );
        })
    });
}

fn benchmark_select(c: &mut Criterion) {
    let candidates: Vec<ScoredCandidate> = (0..1000)
        .map(|i| ScoredCandidate {
            filename: format!("img{i}.JPEG"),
            path: format!("train/n{:08}/images/img{i}.JPEG", i % 20),
            label: format!("label{}", i % 20),
            score: (i % 997) as f32 / 997.0,
        })
        .collect();

    c.bench_function("select_1000", |b| {
        b.iter(|| {
            let _ = selection::select(black_box(candidates.clone()), 0.35, 6, 15);
        })
    });
}

criterion_group!(
    benches,
    benchmark_score_hybrid,
    benchmark_score_keyword_only,
    benchmark_select
);
criterion_main!(benches);
