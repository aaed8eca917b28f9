//! Test utilities for trimap-ops
//!
//! Fixtures shared by the unit tests. Only compiled for tests.

use crate::trimap_ops::mask::Mask;
use crate::Image;
use image::Rgba;

/// Creates a 2x2 RGBA image with known pixel values:
/// - (0,0): [200, 150, 100, 255] (opaque)
/// - (1,0): [100, 200, 150, 128] (semi-transparent)
/// - (0,1): [150, 100, 200, 64]  (more transparent)
/// - (1,1): [50, 75, 25, 0]      (fully transparent)
pub fn create_test_rgba_image() -> Image<Rgba<u8>> {
    let mut image: Image<Rgba<u8>> = Image::new(2, 2);
    image.put_pixel(0, 0, Rgba([200, 150, 100, 255]));
    image.put_pixel(1, 0, Rgba([100, 200, 150, 128]));
    image.put_pixel(0, 1, Rgba([150, 100, 200, 64]));
    image.put_pixel(1, 1, Rgba([50, 75, 25, 0]));
    image
}

/// Creates an image filled with a single color.
pub fn create_uniform_image(width: u32, height: u32, color: Rgba<u8>) -> Image<Rgba<u8>> {
    Image::from_pixel(width, height, color)
}

/// Creates an image with a `border`-pixel frame around a filled interior.
pub fn create_framed_image(
    width: u32,
    height: u32,
    border: u32,
    frame: Rgba<u8>,
    interior: Rgba<u8>,
) -> Image<Rgba<u8>> {
    Image::from_fn(width, height, |x, y| {
        let inside = x >= border && y >= border && x + border < width && y + border < height;
        if inside {
            interior
        } else {
            frame
        }
    })
}

/// Builds an image from ASCII rows: `#` uses `set`, anything else `unset`.
pub fn image_from_rows(rows: &[&str], set: Rgba<u8>, unset: Rgba<u8>) -> Image<Rgba<u8>> {
    let mask = mask_from_rows(rows);
    Image::from_fn(mask.width(), mask.height(), |x, y| {
        if mask.get(x, y) == Some(true) {
            set
        } else {
            unset
        }
    })
}

/// Builds a mask from ASCII rows, `#` marking set pixels.
///
/// Panics on ragged rows.
pub fn mask_from_rows(rows: &[&str]) -> Mask {
    let width = rows[0].len() as u32;
    assert!(rows.iter().all(|row| row.len() as u32 == width));
    let data = rows
        .iter()
        .flat_map(|row| row.bytes().map(|b| b == b'#'))
        .collect();
    Mask::from_vec(width, rows.len() as u32, data).expect("non-empty rows")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_framed_image_paints_border() {
        let white = Rgba([255, 255, 255, 255]);
        let black = Rgba([0, 0, 0, 255]);
        let image = create_framed_image(4, 3, 1, white, black);
        assert_eq!(image.get_pixel(0, 0), &white);
        assert_eq!(image.get_pixel(1, 1), &black);
        assert_eq!(image.get_pixel(2, 1), &black);
        assert_eq!(image.get_pixel(3, 1), &white);
        assert_eq!(image.get_pixel(1, 2), &white);
    }

    #[test]
    fn mask_from_rows_reads_hashes() {
        let mask = mask_from_rows(&["#.", ".#"]);
        assert_eq!(mask.dimensions(), (2, 2));
        assert_eq!(mask.as_slice(), &[true, false, false, true]);
    }
}
