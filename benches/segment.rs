//! Segmentation and document build benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use textarea_overlay::render::OverlayDocument;
use textarea_overlay::text::{HighlightRange, LineHighlights, index_lines, segment};
use textarea_overlay::unicode::Direction;

fn sample_text(lines: usize) -> String {
    (0..lines)
        .map(|i| format!("line {i}: the quick brown fox jumps over the lazy dog"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Overlapping ranges every 7 chars, some spanning line breaks.
fn sample_ranges(len: usize) -> Vec<HighlightRange> {
    (0..len)
        .step_by(7)
        .map(|start| HighlightRange::new(start, start + 11, "#ffeb3b"))
        .collect()
}

fn line_indexing(c: &mut Criterion) {
    let text = sample_text(1000);
    c.bench_function("index_lines_1000", |b| {
        b.iter(|| index_lines(black_box(&text)))
    });
}

fn segmentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment");
    for lines in [10, 100, 1000] {
        let text = sample_text(lines);
        let ranges = sample_ranges(text.chars().count());
        let line_highlights = LineHighlights::new();
        group.bench_with_input(BenchmarkId::from_parameter(lines), &lines, |b, _| {
            b.iter(|| segment(black_box(&text), black_box(&ranges), &line_highlights))
        });
    }
    group.finish();
}

fn document_build(c: &mut Criterion) {
    let text = sample_text(200);
    let ranges = sample_ranges(text.chars().count());
    let mut line_highlights = LineHighlights::new();
    line_highlights.insert(3, "current".into());
    c.bench_function("document_build_200", |b| {
        b.iter(|| {
            OverlayDocument::build(
                black_box(&text),
                black_box(&ranges),
                &line_highlights,
                Direction::Ltr,
            )
        })
    });
}

fn paste_large(c: &mut Criterion) {
    let text = "x".repeat(50_000);
    let ranges = vec![HighlightRange::new(100, 40_000, "mark")];
    c.bench_function("segment_single_line_50k", |b| {
        b.iter(|| segment(black_box(&text), black_box(&ranges), &LineHighlights::new()))
    });
}

fn document_build_dense_line(c: &mut Criterion) {
    let text = "x".repeat(40_000);
    let ranges: Vec<HighlightRange> = (0..40_000)
        .step_by(10)
        .map(|start| HighlightRange::new(start + 3, start + 7, "mark"))
        .collect();
    c.bench_function("document_build_single_line_4k_highlights", |b| {
        b.iter(|| {
            OverlayDocument::build(
                black_box(&text),
                black_box(&ranges),
                &LineHighlights::new(),
                Direction::Ltr,
            )
        })
    });
}

criterion_group!(
    benches,
    line_indexing,
    segmentation,
    document_build,
    document_build_dense_line,
    paste_large
);
criterion_main!(benches);
