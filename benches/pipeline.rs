//! Benchmarks for the ripper pipeline.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{Rgba, RgbaImage};

use ripper::pipeline::{
    clean_fringe, detect_background, flood_fill, Backend, BulkBackend, MaskBackend, ScalarBackend,
};
use ripper::{process, Colour, ProcessingOptions};

/// A white canvas with a blue disc and a pink anti-aliasing ring.
fn sprite(size: u32) -> RgbaImage {
    let c = size as f64 / 2.0;
    let r = size as f64 * 0.35;
    RgbaImage::from_fn(size, size, |x, y| {
        let d = ((x as f64 - c).powi(2) + (y as f64 - c).powi(2)).sqrt();
        if d < r {
            Rgba([30, 60, 200, 255])
        } else if d < r + 2.0 {
            Rgba([235, 215, 215, 255])
        } else {
            Rgba([255, 255, 255, 255])
        }
    })
}

// -- Stage benchmarks --

fn bench_detection(c: &mut Criterion) {
    let img = sprite(512);
    c.bench_function("detect_background_512", |b| {
        b.iter(|| detect_background(black_box(&img)))
    });
}

fn bench_flood_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_fill");

    for size in [128u32, 512, 1024] {
        let img = sprite(size);
        for backend in [Backend::Scalar, Backend::Bulk] {
            let label = format!("{:?}", backend).to_lowercase();
            group.bench_with_input(BenchmarkId::new(label, size), &img, |b, img| {
                b.iter(|| {
                    let mut work = img.clone();
                    flood_fill(&mut work, Colour::WHITE, 40, backend.strategy())
                })
            });
        }
    }

    group.finish();
}

fn bench_fringe(c: &mut Criterion) {
    let mut group = c.benchmark_group("fringe");

    let mut flooded = sprite(512);
    flood_fill(&mut flooded, Colour::WHITE, 40, &BulkBackend);

    group.bench_function("scalar_512", |b| {
        b.iter(|| {
            let mut work = flooded.clone();
            clean_fringe(&mut work, Colour::WHITE, 80, 2, &ScalarBackend)
        })
    });
    group.bench_function("bulk_512", |b| {
        b.iter(|| {
            let mut work = flooded.clone();
            clean_fringe(&mut work, Colour::WHITE, 80, 2, &BulkBackend)
        })
    });

    group.finish();
}

fn bench_masks(c: &mut Criterion) {
    let mut group = c.benchmark_group("colour_mask");
    let img = sprite(1024);
    let backends: [(&str, &dyn MaskBackend); 2] = [("scalar", &ScalarBackend), ("bulk", &BulkBackend)];

    for (name, backend) in backends {
        group.bench_function(name, |b| {
            b.iter(|| backend.colour_mask(black_box(&img), Colour::WHITE, 40))
        });
    }

    group.finish();
}

// -- End-to-end --

fn bench_process(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("source.png");
    sprite(256).save(&source).unwrap();

    let options = ProcessingOptions {
        output_dir: Some(dir.path().join("out")),
        root: Some(dir.path().to_path_buf()),
        preview: false,
        ..Default::default()
    };

    c.bench_function("process_256", |b| {
        b.iter(|| process(black_box(&source), &options))
    });
}

criterion_group!(
    benches,
    bench_detection,
    bench_flood_fill,
    bench_fringe,
    bench_masks,
    bench_process
);
criterion_main!(benches);
