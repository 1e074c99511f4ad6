//! Criterion benchmarks for gifcrop critical paths
//!
//! Benchmarks the core performance-critical operations:
//! - Frame cropping: materialize + palette re-index
//! - Animation cropping: sequential vs parallel fan-out
//! - Codec: encode and decode of a cropped animation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gifcrop::gif::encode_to_vec;
use gifcrop::{
    crop, crop_animation_with, decode_gif, Animation, CropOptions, CropRect, DisposalMethod, Frame,
    Palette,
};
use std::io::Cursor;
use std::sync::Arc;

// =============================================================================
// Test Data Generators
// =============================================================================

/// 256-color palette with distinct entries
fn make_palette() -> Arc<Palette> {
    let rgb: Vec<u8> = (0..=255u8).flat_map(|i| [i, i.wrapping_mul(7), 255 - i]).collect();
    Arc::new(Palette::from_rgb(&rgb, None).unwrap())
}

/// Square frame with a diagonal index pattern
fn make_frame(size: u32, palette: Arc<Palette>) -> Frame {
    let pixels = (0..size).flat_map(|y| (0..size).map(move |x| ((x + y) % 256) as u8)).collect();
    Frame::new(size, size, pixels, palette, None).unwrap()
}

fn make_animation(size: u32, frames: usize) -> Animation {
    let palette = make_palette();
    let mut anim = Animation::new(size, size);
    for _ in 0..frames {
        anim.push_frame(make_frame(size, palette.clone()), 4, DisposalMethod::Keep);
    }
    anim
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_crop_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("crop_frame");
    for size in [64u32, 256, 512] {
        let frame = make_frame(size, make_palette());
        let rect = CropRect::new(size / 4, size / 4, size / 2, size / 2);
        group.throughput(Throughput::Elements(rect.area() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &frame, |b, frame| {
            b.iter(|| crop(black_box(frame), black_box(rect)).unwrap())
        });
    }
    group.finish();
}

fn bench_crop_animation(c: &mut Criterion) {
    let mut group = c.benchmark_group("crop_animation");
    let anim = make_animation(256, 32);
    let rect = CropRect::new(32, 32, 192, 192);

    for jobs in [1usize, 0] {
        let options = CropOptions::new().with_jobs(jobs);
        let label = if jobs == 1 { "sequential" } else { "parallel" };
        group.bench_function(label, |b| {
            b.iter(|| crop_animation_with(black_box(&anim), rect, &options).unwrap())
        });
    }
    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let anim = make_animation(128, 16);
    let bytes = encode_to_vec(&anim).unwrap();

    c.bench_function("encode_gif", |b| b.iter(|| encode_to_vec(black_box(&anim)).unwrap()));
    c.bench_function("decode_gif", |b| {
        b.iter(|| decode_gif(Cursor::new(black_box(bytes.as_slice()))).unwrap())
    });
}

criterion_group!(benches, bench_crop_frame, bench_crop_animation, bench_codec);
criterion_main!(benches);
