use crate::error::Error;
use crate::utils::{
    validate_buffer_length, validate_interleaved, validate_matching_dimensions,
    validate_non_empty_image,
};
use crate::Image;
use image::Luma;

/// Single-channel binary mask, one flag per pixel in row-major order.
///
/// `true` marks a set pixel. For flood-fill output that means
/// "reachable background".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    data: Vec<bool>,
}

impl Mask {
    /// Creates a mask with every pixel unset.
    pub fn new(width: u32, height: u32) -> Result<Self, Error> {
        Self::filled(width, height, false)
    }

    /// Creates a mask with every pixel set to `value`.
    pub fn filled(width: u32, height: u32, value: bool) -> Result<Self, Error> {
        validate_non_empty_image(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![value; width as usize * height as usize],
        })
    }

    /// Wraps row-major flags.
    ///
    /// # Errors
    ///
    /// * `Error::EmptyImage` for zero dimensions
    /// * `Error::BufferLengthMismatch` if `data.len() != width * height`
    pub fn from_vec(width: u32, height: u32, data: Vec<bool>) -> Result<Self, Error> {
        validate_non_empty_image(width, height)?;
        validate_buffer_length(data.len(), width, height, 1)?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Builds a mask by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self, Error>
    where
        F: FnMut(u32, u32) -> bool,
    {
        validate_non_empty_image(width, height)?;
        let data = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Reads a mask stored in the first channel of an interleaved buffer.
    ///
    /// A pixel is set when its channel-0 sample is non-zero; the other
    /// channels are ignored.
    pub fn from_interleaved(
        data: &[u8],
        width: u32,
        height: u32,
        channels: usize,
    ) -> Result<Self, Error> {
        validate_interleaved(data.len(), width, height, channels)?;
        Ok(Self {
            width,
            height,
            data: data.chunks_exact(channels).map(|p| p[0] != 0).collect(),
        })
    }

    /// Writes the mask as an interleaved 8-bit buffer.
    ///
    /// Set pixels become 255 and unset pixels 0 on every color channel.
    /// Layouts with alpha (2 or 4 channels) get a fully opaque alpha.
    pub fn to_interleaved(&self, channels: usize) -> Result<Vec<u8>, Error> {
        crate::utils::validate_channels(channels)?;
        Ok(interleave(
            self.data.iter().map(|&set| if set { 255 } else { 0 }),
            self.data.len(),
            channels,
        ))
    }

    /// Reads a grayscale image; non-zero pixels are set.
    pub fn from_luma(image: &Image<Luma<u8>>) -> Result<Self, Error> {
        let (width, height) = image.dimensions();
        Self::from_interleaved(image.as_raw(), width, height, 1)
    }

    /// Renders the mask as a grayscale image (255 = set).
    pub fn to_luma(&self) -> Image<Luma<u8>> {
        let width = self.width as usize;
        Image::from_fn(self.width, self.height, |x, y| {
            Luma([if self.data[y as usize * width + x as usize] {
                255
            } else {
                0
            }])
        })
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<bool> {
        self.data
    }

    /// Flag at `(x, y)`; `None` outside the mask.
    pub fn get(&self, x: u32, y: u32) -> Option<bool> {
        if x < self.width && y < self.height {
            Some(self.data[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = bool> + '_ {
        self.data.iter().copied()
    }

    /// Number of set pixels.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&set| set).count()
    }

    /// No pixel is set.
    pub fn is_empty(&self) -> bool {
        !self.data.iter().any(|&set| set)
    }

    /// Every pixel is set.
    pub fn is_full(&self) -> bool {
        self.data.iter().all(|&set| set)
    }

    /// Every pixel set in `self` is also set in `other`.
    pub fn is_subset_of(&self, other: &Self) -> Result<bool, Error> {
        validate_matching_dimensions(self.dimensions(), other.dimensions())?;
        Ok(self
            .data
            .iter()
            .zip(&other.data)
            .all(|(&a, &b)| !a || b))
    }

    /// Mask with every flag inverted.
    pub fn complement(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&set| !set).collect(),
        }
    }

    pub(crate) fn from_parts(width: u32, height: u32, data: Vec<bool>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize);
        Self {
            width,
            height,
            data,
        }
    }
}

/// Expands one value per pixel into an interleaved buffer, forcing alpha
/// to 255 for LumaA and RGBA layouts.
pub(crate) fn interleave<I>(values: I, pixel_count: usize, channels: usize) -> Vec<u8>
where
    I: Iterator<Item = u8>,
{
    let has_alpha = matches!(channels, 2 | 4);
    let mut out = Vec::with_capacity(pixel_count * channels);
    for value in values {
        if has_alpha {
            out.extend(std::iter::repeat(value).take(channels - 1));
            out.push(u8::MAX);
        } else {
            out.extend(std::iter::repeat(value).take(channels));
        }
    }
    out
}
