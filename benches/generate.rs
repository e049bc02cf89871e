//! Benchmarks for merge commits and code generation.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::expect_used, clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gridmerge::codegen::generate;
use gridmerge::{CellPosition, CellRect, MergeEditor};

/// Editor with a checkerboard of 2x2 merges covering the grid.
fn tiled_editor(size: u32) -> MergeEditor {
    let mut editor = MergeEditor::with_size(size);
    for row in (0..size.saturating_sub(1)).step_by(2) {
        for col in (0..size.saturating_sub(1)).step_by(2) {
            let rect = CellRect::from_corners(
                CellPosition::new(row, col),
                CellPosition::new(row + 1, col + 1),
            );
            editor.merge_range(rect).expect("tiles do not overlap");
        }
    }
    editor
}

/// Benchmark generation across grid sizes
fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for size in [8u32, 32, 128] {
        let editor = tiled_editor(size);
        group.throughput(Throughput::Elements(u64::from(size) * u64::from(size)));
        group.bench_with_input(BenchmarkId::from_parameter(size), &editor, |b, editor| {
            b.iter(|| {
                generate(
                    black_box(editor.size()),
                    black_box(editor.regions()),
                    black_box(editor.occluded()),
                )
            })
        });
    }
    group.finish();
}

/// Benchmark merging a full grid of 2x2 tiles
fn bench_merge(c: &mut Criterion) {
    c.bench_function("merge_tiles_64", |b| b.iter(|| tiled_editor(black_box(64))));
}

criterion_group!(benches, bench_generate, bench_merge);
criterion_main!(benches);
