use image::{GrayImage, Luma, Rgba, RgbaImage};
use speculate::speculate;

use blindmark_core::*;

fn gray_carrier(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let v = (120.0 + 25.0 * (x as f64 * 0.11).sin() + 25.0 * (y as f64 * 0.07).cos()).round() as u8;
        Rgba([v, v, v, 255])
    })
}

fn logo(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| {
        let (dx, dy) = (x as i32 - width as i32 / 2, y as i32 - height as i32 / 2);
        if dx * dx + dy * dy < (width as i32 / 3).pow(2) || x == 0 {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

fn agreement(a: &GrayImage, b: &GrayImage) -> f64 {
    let same = a
        .pixels()
        .zip(b.pixels())
        .filter(|(p, q)| (p.0[0] > 128) == (q.0[0] > 128))
        .count();

    same as f64 / a.pixels().len() as f64
}

speculate! {
    describe "Watermarker::embed_text()" {
        it "should hide and unveil 'Hello' in a 256x256 gray image at strength 20" {
            let watermarker = Watermarker::new(
                WatermarkOptions::default().with_engine(EngineOptions::default().with_strength(20.0)),
            )
            .unwrap();

            let watermarked = watermarker.embed_text(&gray_carrier(256, 256), "Hello").unwrap();
            let extracted = watermarker.extract(&watermarked).unwrap();

            assert_eq!(extracted.watermark.payload_type(), PayloadType::Text);
            assert_eq!(extracted.watermark, Watermark::Text("Hello".to_string()));
        }

        it "should work the same with direct tiling" {
            let watermarker = Watermarker::new(
                WatermarkOptions::default().with_engine(EngineOptions::direct()),
            )
            .unwrap();

            let watermarked = watermarker.embed_text(&gray_carrier(128, 128), "direct tiling").unwrap();
            let extracted = watermarker.extract(&watermarked).unwrap();

            assert_eq!(extracted.watermark, Watermark::Text("direct tiling".to_string()));
        }

        it "should fail to unveil with a different sub-band" {
            let hl = Watermarker::new(WatermarkOptions::default()).unwrap();
            let hh = Watermarker::new(
                WatermarkOptions::default().with_engine(EngineOptions::wavelet(Subband::HighHigh)),
            )
            .unwrap();

            let watermarked = hl.embed_text(&gray_carrier(256, 256), "Hello").unwrap();

            assert_ne!(
                hh.extract(&watermarked).ok().map(|e| e.watermark),
                Some(Watermark::Text("Hello".to_string()))
            );
        }
    }

    describe "capacity planning" {
        it "should give a 16x16 host exactly one bit" {
            let watermarker = Watermarker::new(WatermarkOptions::default()).unwrap();
            let host = gray_carrier(16, 16);

            assert_eq!(watermarker.capacity(&host), 1);
            assert!(watermarker.engine().embed(&host, &[true]).is_ok());
            assert!(matches!(
                watermarker.engine().embed(&host, &[true, false]),
                Err(WatermarkError::CapacityExceeded { required: 2, available: 1 })
            ));
        }

        it "should not produce an image when the payload is too large" {
            let watermarker = Watermarker::new(WatermarkOptions::default()).unwrap();
            let text = "x".repeat(watermarker.payload_capacity(256, 256) + 1);

            let result = watermarker.embed_text(&gray_carrier(256, 256), &text);

            assert!(matches!(result, Err(ref e) if e.is_precondition()));
        }
    }

    describe "Watermarker::embed_image()" {
        it "should reconstruct a 32x32 bitmap exactly from a host large enough" {
            let watermarker = Watermarker::new(WatermarkOptions::default()).unwrap();
            let bitmap = logo(32, 32);
            let host = gray_carrier(640, 640);

            let watermarked = watermarker.embed_image(&host, &bitmap).unwrap();
            let extracted = watermarker.extract(&watermarked).unwrap();

            assert!(extracted.warnings.is_empty());
            match extracted.watermark {
                Watermark::Image(unveiled) => {
                    assert_eq!(unveiled.dimensions(), (32, 32));
                    assert!(agreement(&bitmap, &unveiled) >= 0.95);
                    assert_eq!(unveiled, bitmap);
                }
                other => panic!("expected an image watermark, got {other:?}"),
            }
        }

        it "should shrink a 32x32 bitmap into a 256x256 host" {
            let watermarker = Watermarker::new(WatermarkOptions::default()).unwrap();

            let watermarked = watermarker.embed_image(&gray_carrier(256, 256), &logo(32, 32)).unwrap();
            let extracted = watermarker.extract(&watermarked).unwrap();

            match extracted.watermark {
                Watermark::Image(unveiled) => assert_eq!(unveiled.dimensions(), (13, 13)),
                other => panic!("expected an image watermark, got {other:?}"),
            }
        }
    }
}
