//! Criterion micro-benchmarks for arena allocation, build, and rewind.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scree_bench::{default_arena, fill_scope, small_chunk_arena};

/// Benchmark: bump-allocate 64-byte objects, rewinding the scope each
/// iteration so the arena never grows past its first chunk.
fn bench_alloc_64(c: &mut Criterion) {
    let mut arena = default_arena();
    c.bench_function("alloc_64", |b| {
        b.iter(|| {
            let mark = arena.mark();
            for _ in 0..32 {
                let h = arena.alloc(64).unwrap();
                black_box(h);
            }
            arena.rewind(mark).unwrap();
        });
    });
}

/// Benchmark: build a 256-byte object via 32 appends, then discard it.
fn bench_build_finish(c: &mut Criterion) {
    let mut arena = default_arena();
    let piece = [0xA5u8; 8];
    c.bench_function("build_finish_256", |b| {
        b.iter(|| {
            arena.begin().unwrap();
            for _ in 0..32 {
                arena.append(&piece).unwrap();
            }
            let h = arena.finish().unwrap();
            black_box(h);
            arena.rewind_to(&h).unwrap();
        });
    });
}

/// Benchmark: fill a scope of 1000 mixed-size objects across many small
/// chunks, then rewind it — the chunk-release path.
fn bench_scope_rewind(c: &mut Criterion) {
    c.bench_function("scope_rewind_1000", |b| {
        b.iter(|| {
            let mut arena = small_chunk_arena();
            let mark = fill_scope(&mut arena, 1000);
            arena.rewind(mark).unwrap();
            black_box(arena.chunk_count());
        });
    });
}

criterion_group!(benches, bench_alloc_64, bench_build_finish, bench_scope_rewind);
criterion_main!(benches);
