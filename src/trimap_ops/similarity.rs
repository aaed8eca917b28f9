//! Background similarity predicates used to drive the flood fill.
//!
//! The traversal only asks "does this pixel look like background?". Any
//! `Fn(&[u8]) -> bool` answers that question, and two built-in metrics
//! cover the common cases:
//!
//! - [`ChannelDistance`]: largest per-channel absolute difference
//! - [`LuminanceDistance`]: difference of alpha-weighted luma

use crate::error::Error;
use crate::trimap_ops::pixel_buffer::PixelBuffer;
use image::{Luma, LumaA, Pixel, Rgb, Rgba};
use imageproc::definitions::Clamp;

/// Decides whether a single interleaved pixel belongs to the background.
pub trait SimilarityPredicate {
    fn is_background(&self, pixel: &[u8]) -> bool;
}

impl<F> SimilarityPredicate for F
where
    F: Fn(&[u8]) -> bool,
{
    #[inline]
    fn is_background(&self, pixel: &[u8]) -> bool {
        self(pixel)
    }
}

/// One of the four image corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Corner {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Where the reference background color comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceColor {
    /// Sample the given corner pixel of the image.
    Corner(Corner),
    /// Use a fixed color with one value per image channel.
    Fixed(Vec<u8>),
    /// 255 on every channel.
    NearWhite,
}

impl Default for ReferenceColor {
    fn default() -> Self {
        Self::Corner(Corner::TopLeft)
    }
}

impl ReferenceColor {
    /// Resolves the reference against a concrete image.
    ///
    /// # Errors
    ///
    /// `Error::ReferenceChannelMismatch` when a fixed color does not have
    /// exactly `image.channels()` components.
    pub fn resolve(&self, image: &PixelBuffer<'_>) -> Result<Vec<u8>, Error> {
        let (width, height) = image.dimensions();
        let (right, bottom) = (width - 1, height - 1);
        match self {
            Self::Corner(corner) => {
                let (x, y) = match corner {
                    Corner::TopLeft => (0, 0),
                    Corner::TopRight => (right, 0),
                    Corner::BottomLeft => (0, bottom),
                    Corner::BottomRight => (right, bottom),
                };
                let index = y as usize * width as usize + x as usize;
                Ok(image.pixel_at(index).to_vec())
            }
            Self::Fixed(color) => {
                if color.len() == image.channels() {
                    Ok(color.clone())
                } else {
                    Err(Error::ReferenceChannelMismatch {
                        expected: image.channels(),
                        actual: color.len(),
                    })
                }
            }
            Self::NearWhite => Ok(vec![u8::MAX; image.channels()]),
        }
    }
}

/// Built-in similarity metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimilarityMetric {
    /// Chebyshev distance over all channels.
    #[default]
    Channel,
    /// Absolute luma difference, alpha-weighted.
    Luminance,
}

/// Background when every channel is within `threshold` of the reference.
///
/// A threshold of 0 accepts only exact matches; 255 accepts every pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelDistance {
    reference: Vec<u8>,
    threshold: u8,
}

impl ChannelDistance {
    pub fn new(reference: Vec<u8>, threshold: u8) -> Self {
        Self {
            reference,
            threshold,
        }
    }

    /// Largest absolute difference over the channels both slices share.
    #[inline]
    pub fn distance(&self, pixel: &[u8]) -> u8 {
        pixel
            .iter()
            .zip(&self.reference)
            .map(|(&p, &r)| p.abs_diff(r))
            .max()
            .unwrap_or(0)
    }
}

impl SimilarityPredicate for ChannelDistance {
    #[inline]
    fn is_background(&self, pixel: &[u8]) -> bool {
        self.distance(pixel) <= self.threshold
    }
}

/// Background when the alpha-weighted luma is within `threshold` of the
/// reference luma.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LuminanceDistance {
    reference: u8,
    threshold: u8,
}

impl LuminanceDistance {
    /// Builds the predicate from a reference pixel in the same layout as
    /// the image samples.
    pub fn new(reference: &[u8], threshold: u8) -> Self {
        Self {
            reference: luminance(reference),
            threshold,
        }
    }
}

impl SimilarityPredicate for LuminanceDistance {
    #[inline]
    fn is_background(&self, pixel: &[u8]) -> bool {
        luminance(pixel).abs_diff(self.reference) <= self.threshold
    }
}

/// Luma of an interleaved pixel, multiplied by its alpha.
///
/// Pixels with 1 to 4 channels are read as Luma, LumaA, Rgb and Rgba and
/// converted with `image`'s own luma weights.
pub fn luminance(pixel: &[u8]) -> u8 {
    let luma_alpha = match pixel.len() {
        1 => Luma::from_slice(pixel).to_luma_alpha(),
        2 => *LumaA::from_slice(pixel),
        3 => Rgb::from_slice(pixel).to_luma_alpha(),
        4 => Rgba::from_slice(pixel).to_luma_alpha(),
        _ => return 0,
    };
    merge_alpha(luma_alpha)
}

fn merge_alpha(pixel: LumaA<u8>) -> u8 {
    let LumaA([l, a]) = pixel;
    let alpha = f32::from(a) / f32::from(u8::MAX);
    <u8 as Clamp<f32>>::clamp(f32::from(l) * alpha)
}
