use criterion::{criterion_group, criterion_main, Criterion};
use image::{Rgba, RgbaImage};

use blindmark_core::{WatermarkOptions, Watermarker};

pub fn image_extraction(c: &mut Criterion) {
    let watermarker = Watermarker::new(WatermarkOptions::default()).expect("valid options");
    let plain_image = RgbaImage::from_fn(1024, 768, |x, y| {
        let v = (96 + (x / 3 + y / 5) % 64) as u8;
        Rgba([v, v, v, 255])
    });
    let watermarked = watermarker
        .embed_text(&plain_image, "Hello World!")
        .expect("Cannot embed watermark");

    c.bench_function("Image Extraction", |b| {
        b.iter(|| {
            watermarker
                .extract(&watermarked)
                .expect("Cannot extract watermark")
        })
    });
}

criterion_group!(benches, image_extraction);
criterion_main!(benches);
