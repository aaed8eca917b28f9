//! Integration tests for trimap-ops workflows
//!
//! These tests run the full flood fill → morphology → trimap chain the way
//! a caller holding decoded image bytes would.

use image::{Rgb, Rgba};
use trimap_ops::{
    dilate_interleaved, erode_interleaved, flood_fill_interleaved, generate_trimap,
    trimap_from_flood_fill, FloodFillExt, FloodFillOptions, Image, Mask, Morphology,
    MorphologyVariant, PixelBuffer, ReferenceColor, TrimapClass, TrimapConfig, TrimapExt,
    TrimapOptions,
};

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// White 5x5 image with a 3x3 black center.
fn create_framed_image() -> Image<Rgba<u8>> {
    Image::from_fn(5, 5, |x, y| {
        if (1..=3).contains(&x) && (1..=3).contains(&y) {
            BLACK
        } else {
            WHITE
        }
    })
}

/// Product-shot style image: off-white backdrop with slight noise and a
/// colored disc in the middle.
fn create_product_shot(width: u32, height: u32, radius: f32) -> Image<Rgb<u8>> {
    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
    Image::from_fn(width, height, |x, y| {
        if (x as f32 - cx).hypot(y as f32 - cy) <= radius {
            Rgb([180, 40, 30])
        } else {
            let noise = ((x * 7 + y * 13) % 5) as u8;
            Rgb([245 + noise, 245 + noise, 245 + noise])
        }
    })
}

#[test]
fn all_white_image_produces_all_background_trimap() {
    let image: Image<Rgba<u8>> = Image::from_pixel(5, 5, WHITE);
    let config = TrimapConfig::default().with_trimap(TrimapOptions::new(1));

    let result = image.generate_trimap(&config).expect("trimap should succeed");

    assert_eq!(result.background.count(), 25);
    for variant in [MorphologyVariant::Naive, MorphologyVariant::Separable] {
        assert_eq!(result.background.dilate(1, variant).unwrap(), result.background);
        assert_eq!(result.background.erode(1, variant).unwrap(), result.background);
    }
    assert!(result.trimap.as_slice().iter().all(|&v| v == 0));
}

#[test]
fn framed_image_produces_ring_mask_and_no_center_background() {
    let image = create_framed_image();
    let config = TrimapConfig::default().with_trimap(TrimapOptions::new(1));

    let result = image.generate_trimap(&config).expect("trimap should succeed");

    // Only the one-pixel ring is background
    for y in 0..5 {
        for x in 0..5 {
            let on_ring = x == 0 || y == 0 || x == 4 || y == 4;
            assert_eq!(result.background.get(x, y), Some(on_ring));
        }
    }
    // Dilation reaches the inner ring but not the center pixel, and
    // erosion of a 1-pixel ring leaves nothing
    assert_eq!(result.dilated.count(), 24);
    assert_eq!(result.dilated.get(2, 2), Some(false));
    assert!(result.eroded.is_empty());

    // The center is foreground or unknown, never background
    for y in 1..=3 {
        for x in 1..=3 {
            let class = result.trimap.class_at(x, y).unwrap();
            assert_ne!(class, TrimapClass::Background);
        }
    }
    assert_eq!(result.trimap.class_at(2, 2), Some(TrimapClass::Foreground));
    let counts = result.trimap.counts();
    assert_eq!((counts.unknown, counts.foreground), (24, 1));

    for variant in [MorphologyVariant::Naive, MorphologyVariant::Separable] {
        assert_eq!(result.background.dilate(1, variant).unwrap(), result.dilated);
    }
}

#[test]
fn product_shot_gets_foreground_core_and_unknown_band() {
    let image = create_product_shot(64, 48, 12.0);
    let config = TrimapConfig::default()
        .with_flood_fill(
            FloodFillOptions::default()
                .with_reference(ReferenceColor::NearWhite)
                .with_threshold(20),
        )
        .with_trimap(TrimapOptions::new(3));

    let result = image.generate_trimap(&config).expect("trimap should succeed");
    let trimap = &result.trimap;

    assert_eq!(trimap.class_at(32, 24), Some(TrimapClass::Foreground));
    assert_eq!(trimap.class_at(0, 0), Some(TrimapClass::Background));
    assert_eq!(trimap.class_at(63, 47), Some(TrimapClass::Background));
    // Just outside the disc edge lies inside the unknown band
    assert_eq!(trimap.class_at(32 + 13, 24), Some(TrimapClass::Unknown));
    assert_eq!(trimap.class_at(32 + 11, 24), Some(TrimapClass::Unknown));

    let counts = trimap.counts();
    assert!(counts.foreground > 0);
    assert!(counts.unknown > 0);
    assert!(counts.background > counts.foreground);
    assert!(!trimap.is_degenerate());
}

#[test]
fn wider_radius_widens_unknown_band() {
    let image = create_product_shot(64, 64, 14.0);
    let background = image
        .flood_fill_background(
            &FloodFillOptions::default()
                .with_reference(ReferenceColor::NearWhite)
                .with_threshold(20),
        )
        .unwrap();

    let narrow = generate_trimap(&background, &TrimapOptions::new(1)).unwrap();
    let wide = generate_trimap(&background, &TrimapOptions::new(4)).unwrap();

    assert!(wide.counts().unknown > narrow.counts().unknown);
    assert!(wide.counts().foreground < narrow.counts().foreground);
}

#[test]
fn interleaved_workflow_matches_typed_workflow() {
    // Raw RGBA bytes as an external decoder would hand them over
    let image = create_product_shot(40, 30, 8.0);
    let rgba: Image<Rgba<u8>> = Image::from_fn(40, 30, |x, y| {
        let Rgb([r, g, b]) = *image.get_pixel(x, y);
        Rgba([r, g, b, 255])
    });
    let bytes = rgba.as_raw().clone();
    let options = FloodFillOptions::default().with_threshold(20);

    let mask = flood_fill_interleaved(&bytes, 40, 30, 4, &options).unwrap();
    let flood_bytes = mask.to_interleaved(4).unwrap();

    let dilated = dilate_interleaved(&flood_bytes, 40, 30, 4, 2, MorphologyVariant::Separable)
        .unwrap();
    let dilated_naive =
        dilate_interleaved(&flood_bytes, 40, 30, 4, 2, MorphologyVariant::Naive).unwrap();
    assert_eq!(dilated, dilated_naive);

    let eroded = erode_interleaved(&flood_bytes, 40, 30, 4, 2, MorphologyVariant::Separable)
        .unwrap();
    assert_eq!(eroded.len(), bytes.len());

    let trimap_bytes =
        trimap_from_flood_fill(&flood_bytes, 40, 30, 4, 2, MorphologyVariant::Separable).unwrap();
    let typed = image
        .generate_trimap(&TrimapConfig {
            flood_fill: options,
            trimap: TrimapOptions::new(2),
        })
        .unwrap();
    assert_eq!(trimap_bytes, typed.trimap.to_interleaved(4).unwrap());
    assert_eq!(
        Mask::from_interleaved(&eroded, 40, 30, 4).unwrap(),
        typed.eroded
    );
}

#[test]
fn pixel_buffer_from_image_matches_raw_view() {
    let image = create_framed_image();
    let from_image = PixelBuffer::from_image(&image).unwrap();
    let raw = PixelBuffer::new(image.as_raw(), 5, 5, 4).unwrap();
    assert_eq!(from_image, raw);
    assert_eq!(raw.pixel(2, 2), Some(&[0, 0, 0, 255][..]));
    assert_eq!(raw.pixel(5, 0), None);
    assert_eq!(raw.pixel(0, 5), None);
}

#[cfg(feature = "png")]
#[test]
fn trimap_survives_png_encoding() {
    use image::ImageFormat;
    use std::io::Cursor;

    let image = create_product_shot(32, 32, 6.0);
    let result = image
        .generate_trimap(
            &TrimapConfig::default()
                .with_flood_fill(FloodFillOptions::default().with_threshold(20))
                .with_trimap(TrimapOptions::new(2)),
        )
        .unwrap();

    let luma = result.trimap.to_luma();
    let mut encoded = Vec::new();
    luma.write_to(&mut Cursor::new(&mut encoded), ImageFormat::Png)
        .unwrap();

    let decoded = image::load_from_memory_with_format(&encoded, ImageFormat::Png)
        .unwrap()
        .to_luma8();
    assert_eq!(decoded.as_raw().as_slice(), result.trimap.as_slice());
}
