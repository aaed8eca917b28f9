use crate::error::Error;
use crate::utils::validate_interleaved;
use crate::Image;
use image::Pixel;

/// Borrowed view over an interleaved 8-bit image.
///
/// The buffer holds `width * height` pixels in row-major order, each made
/// of `channels` consecutive samples. The length is validated on
/// construction, so indexing afterwards cannot go out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBuffer<'a> {
    pixels: &'a [u8],
    width: u32,
    height: u32,
    channels: usize,
}

impl<'a> PixelBuffer<'a> {
    /// Wraps an interleaved buffer.
    ///
    /// # Errors
    ///
    /// * `Error::EmptyImage` if `width` or `height` is zero
    /// * `Error::InvalidChannelCount` if `channels` is not in `1..=4`
    /// * `Error::BufferLengthMismatch` if `pixels.len() != width * height * channels`
    pub fn new(pixels: &'a [u8], width: u32, height: u32, channels: usize) -> Result<Self, Error> {
        validate_interleaved(pixels.len(), width, height, channels)?;
        Ok(Self {
            pixels,
            width,
            height,
            channels,
        })
    }

    /// Views an `image` buffer with 8-bit subpixels.
    pub fn from_image<P>(image: &'a Image<P>) -> Result<Self, Error>
    where
        P: Pixel<Subpixel = u8>,
    {
        let (width, height) = image.dimensions();
        Self::new(image.as_raw(), width, height, usize::from(P::CHANNEL_COUNT))
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    pub const fn channels(&self) -> usize {
        self.channels
    }

    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels (not samples).
    pub const fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Always `false`; empty buffers are rejected by [`PixelBuffer::new`].
    pub const fn is_empty(&self) -> bool {
        false
    }

    pub const fn as_raw(&self) -> &'a [u8] {
        self.pixels
    }

    /// Samples of the pixel at row-major `index`. The caller keeps
    /// `index < self.len()`.
    #[inline]
    pub(crate) fn pixel_at(&self, index: usize) -> &'a [u8] {
        let start = index * self.channels;
        &self.pixels[start..start + self.channels]
    }

    /// Samples of the pixel at `(x, y)`; `None` outside the image.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<&'a [u8]> {
        if x < self.width && y < self.height {
            Some(self.pixel_at(y as usize * self.width as usize + x as usize))
        } else {
            None
        }
    }

    pub fn pixels(&self) -> impl ExactSizeIterator<Item = &'a [u8]> + 'a {
        self.pixels.chunks_exact(self.channels)
    }

    /// Whether the channel layout ends with an alpha channel (LumaA or RGBA).
    pub const fn has_alpha(&self) -> bool {
        matches!(self.channels, 2 | 4)
    }
}
