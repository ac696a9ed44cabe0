//! Criterion benchmarks for line linearization and chain edits.
//!
//! Chains are built with segments stored in shuffled order so the
//! linearizer cannot benefit from insertion order.
//!
//! Run with: cargo bench -p transit_lines --bench linearize_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use transit_lines::segment_chain::linearize::ordered_stops;
use transit_lines::{Segment, SegmentChain, Span, StopId};

// ---------------------------------------------------------------------------
// Fixture
// ---------------------------------------------------------------------------

/// A straight line of `len` segments, each 10 long, in shuffled order.
fn shuffled_line(len: u32) -> Vec<Segment> {
    let mut segments: Vec<Segment> = (0..len)
        .map(|i| {
            Segment::new(StopId(i), StopId(i + 1), Span::of(10).expect("positive span"))
                .expect("distinct stops")
        })
        .collect();
    segments.shuffle(&mut ChaCha8Rng::seed_from_u64(7));
    segments
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_ordered_stops(c: &mut Criterion) {
    let mut group = c.benchmark_group("ordered_stops");
    for len in [10u32, 100, 1_000] {
        let segments = shuffled_line(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &segments, |b, segments| {
            b.iter(|| ordered_stops(black_box(segments)).expect("valid line"));
        });
    }
    group.finish();
}

fn bench_split_and_merge(c: &mut Criterion) {
    let chain = SegmentChain::from_segments(shuffled_line(200)).expect("valid line");
    let fresh = StopId(10_000);
    let split = Segment::new(StopId(100), fresh, Span::of(4).expect("positive span"))
        .expect("distinct stops");

    c.bench_function("insert_then_remove_interior_200", |b| {
        b.iter(|| {
            let mut chain = chain.clone();
            chain.insert(black_box(split)).expect("split fits");
            chain.remove(black_box(fresh)).expect("stop present");
            chain
        });
    });
}

criterion_group!(benches, bench_ordered_stops, bench_split_and_merge);
criterion_main!(benches);
