//! Benchmarks for the enhancement pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgb, RgbImage};
use photoboost_image::{encode_jpeg, enhance, Enhancement, DEFAULT_JPEG_QUALITY, SHARPNESS_FACTOR};

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    })
}

fn bench_enhance(c: &mut Criterion) {
    let img = gradient(1024, 768);

    c.bench_function("enhance_1024x768", |b| b.iter(|| enhance(black_box(&img))));

    c.bench_function("sharpness_1024x768", |b| {
        b.iter(|| Enhancement::Sharpness.apply(black_box(&img), SHARPNESS_FACTOR))
    });
}

fn bench_encode(c: &mut Criterion) {
    let img = gradient(1024, 768);

    c.bench_function("encode_jpeg_q95", |b| {
        b.iter(|| encode_jpeg(black_box(&img), DEFAULT_JPEG_QUALITY))
    });
}

criterion_group!(benches, bench_enhance, bench_encode);
criterion_main!(benches);
