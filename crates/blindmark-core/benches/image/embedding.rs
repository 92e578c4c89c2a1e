use criterion::{criterion_group, criterion_main, Criterion};
use image::{Rgba, RgbaImage};

use blindmark_core::{EngineOptions, WatermarkOptions, Watermarker};

fn carrier() -> RgbaImage {
    RgbaImage::from_fn(1024, 768, |x, y| {
        let v = (96 + (x / 3 + y / 5) % 64) as u8;
        Rgba([v, v, v, 255])
    })
}

pub fn image_embedding(c: &mut Criterion) {
    let plain_image = carrier();
    let message = "Hello World!";

    c.bench_function("Image Embedding Wavelet", |b| {
        let watermarker = Watermarker::new(WatermarkOptions::default()).expect("valid options");

        b.iter(|| {
            watermarker
                .embed_text(&plain_image, message)
                .expect("Cannot embed watermark")
        })
    });

    c.bench_function("Image Embedding Direct", |b| {
        let watermarker =
            Watermarker::new(WatermarkOptions::default().with_engine(EngineOptions::direct()))
                .expect("valid options");

        b.iter(|| {
            watermarker
                .embed_text(&plain_image, message)
                .expect("Cannot embed watermark")
        })
    });
}

criterion_group!(benches, image_embedding);
criterion_main!(benches);
