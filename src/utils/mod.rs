//! Internal validation helpers shared by the trimap operations.

use crate::error::Error;

/// Largest channel count accepted for interleaved buffers (RGBA).
pub const MAX_CHANNELS: usize = 4;

/// Validates that an image has non-zero dimensions.
pub fn validate_non_empty_image(width: u32, height: u32) -> Result<(), Error> {
    if width == 0 || height == 0 {
        Err(Error::EmptyImage { width, height })
    } else {
        Ok(())
    }
}

/// Validates a channel count for an interleaved buffer.
pub fn validate_channels(channels: usize) -> Result<(), Error> {
    if (1..=MAX_CHANNELS).contains(&channels) {
        Ok(())
    } else {
        Err(Error::InvalidChannelCount(channels))
    }
}

/// Validates that a buffer holds exactly `width * height * channels` elements.
///
/// Overflow of the expected length is reported as a mismatch against
/// `usize::MAX`.
pub fn validate_buffer_length(
    len: usize,
    width: u32,
    height: u32,
    channels: usize,
) -> Result<(), Error> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels))
        .ok_or(Error::BufferLengthMismatch {
            expected: usize::MAX,
            actual: len,
        })?;

    if len == expected {
        Ok(())
    } else {
        Err(Error::BufferLengthMismatch {
            expected,
            actual: len,
        })
    }
}

/// Validates the full interleaved buffer contract in one call.
pub fn validate_interleaved(
    len: usize,
    width: u32,
    height: u32,
    channels: usize,
) -> Result<(), Error> {
    validate_non_empty_image(width, height)?;
    validate_channels(channels)?;
    validate_buffer_length(len, width, height, channels)
}

/// Validates that two buffers have matching dimensions.
pub fn validate_matching_dimensions(expected: (u32, u32), actual: (u32, u32)) -> Result<(), Error> {
    if expected != actual {
        Err(Error::DimensionMismatch { expected, actual })
    } else {
        Ok(())
    }
}

/// Validates a morphology radius.
pub fn validate_kernel_radius(radius: u32) -> Result<(), Error> {
    if radius == 0 {
        Err(Error::InvalidKernelRadius(radius))
    } else {
        Ok(())
    }
}
