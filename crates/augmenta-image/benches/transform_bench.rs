// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the per-image transforms in augmenta-image.
// Each transform runs on a 256x256 synthetic gradient, roughly the size of a
// downscaled training image.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgb, RgbImage, Rgba};

use augmenta_core::{AugmentConfig, TransformKind};
use augmenta_image::{Augmenter, ImageProcessor};
use rand::SeedableRng;
use rand::rngs::StdRng;

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn gradient() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(256, 256, |x, y| {
        Rgb([x as u8, y as u8, (x ^ y) as u8])
    }))
}

/// Arbitrary-angle rotation (bilinear, same canvas).
fn bench_rotate(c: &mut Criterion) {
    let img = gradient();
    c.bench_function("rotate 7.5deg (256x256)", |b| {
        b.iter(|| {
            let out = ImageProcessor::from_dynamic(black_box(img.clone()))
                .rotate(7.5, Rgba([255, 255, 255, 255]));
            black_box(out.into_dynamic());
        });
    });
}

/// HSV round trip per pixel.
fn bench_saturation(c: &mut Criterion) {
    let img = gradient();
    c.bench_function("saturation x1.3 (256x256)", |b| {
        b.iter(|| {
            let out = ImageProcessor::from_dynamic(black_box(img.clone())).adjust_saturation(1.3);
            black_box(out.into_dynamic());
        });
    });
}

/// Full randomised dispatch for every transform kind.
fn bench_variants(c: &mut Criterion) {
    let img = gradient();
    let config = AugmentConfig {
        min_crop_size: 128,
        ..AugmentConfig::default()
    };
    let mut augmenter = Augmenter::new(config, StdRng::seed_from_u64(0));
    c.bench_function("one variant of each kind (256x256)", |b| {
        b.iter(|| {
            for kind in TransformKind::ALL {
                black_box(augmenter.variant(kind, black_box(&img)));
            }
        });
    });
}

criterion_group!(benches, bench_rotate, bench_saturation, bench_variants);
criterion_main!(benches);
