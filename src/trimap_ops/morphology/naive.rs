//! Reference morphology: every output pixel scans its whole 2D window,
//! clipped to the image.
//!
//! Slow on large radii, but simple enough to trust. The separable
//! implementation is checked against it.

use itertools::iproduct;

use super::separable::window_bounds;
use super::{Boundary, MorphologyOp};
use crate::error::Error;
use crate::trimap_ops::mask::Mask;
use crate::utils::validate_kernel_radius;

/// Dilates `mask` by scanning the full `(2k + 1)^2` window of each pixel.
pub fn dilate_naive(mask: &Mask, radius: u32, boundary: Boundary) -> Result<Mask, Error> {
    validate_kernel_radius(radius)?;
    Ok(apply(mask, radius, boundary, MorphologyOp::Dilate))
}

/// Erodes `mask` by scanning the full `(2k + 1)^2` window of each pixel.
pub fn erode_naive(mask: &Mask, radius: u32, boundary: Boundary) -> Result<Mask, Error> {
    validate_kernel_radius(radius)?;
    Ok(apply(mask, radius, boundary, MorphologyOp::Erode))
}

fn apply(mask: &Mask, radius: u32, boundary: Boundary, op: MorphologyOp) -> Mask {
    let (width, height) = mask.dimensions();
    let (w, h) = (width as usize, height as usize);
    let r = radius as usize;
    let span = r.saturating_mul(2);
    let src = mask.as_slice();

    let data = iproduct!(0..h, 0..w)
        .map(|(y, x)| {
            let (x0, x1) = window_bounds(x, r, w);
            let (y0, y1) = window_bounds(y, r, h);
            let mut window = iproduct!(y0..=y1, x0..=x1).map(|(sy, sx)| src[sy * w + sx]);
            match op {
                MorphologyOp::Dilate => window.any(|v| v),
                MorphologyOp::Erode => {
                    // Under `Unset`, neighbors cut off by the border count as unset
                    let clipped = x1 - x0 < span || y1 - y0 < span;
                    if clipped && boundary == Boundary::Unset {
                        false
                    } else {
                        window.all(|v| v)
                    }
                }
            }
        })
        .collect();

    Mask::from_parts(width, height, data)
}
