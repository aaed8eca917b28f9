use thiserror::Error;

/// Error type for trimap operations
///
/// Every public operation validates its inputs up front and reports the
/// first violated precondition. No operation returns a partial buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Width or height is zero
    #[error("Image dimensions must be non-zero, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    /// Buffer length does not match `width * height * channels`
    ///
    /// Also returned when the expected length overflows `usize`.
    #[error("Buffer length mismatch: expected {expected} bytes, got {actual}")]
    BufferLengthMismatch {
        /// Expected number of elements
        expected: usize,
        /// Actual number of elements
        actual: usize,
    },

    /// Channel count outside `1..=4`
    #[error("Invalid channel count {0}: must be between 1 and 4")]
    InvalidChannelCount(usize),

    /// Morphology radius of zero
    ///
    /// A zero radius would turn dilation and erosion into silent no-ops,
    /// so it is rejected instead.
    #[error("Invalid kernel radius {0}: must be at least 1")]
    InvalidKernelRadius(u32),

    /// Two buffers that must share dimensions do not
    #[error("Dimension mismatch: expected {expected:?}, actual {actual:?}")]
    DimensionMismatch {
        /// Expected dimensions (width, height)
        expected: (u32, u32),
        /// Actual dimensions (width, height)
        actual: (u32, u32),
    },

    /// A fixed reference color does not have one value per image channel
    #[error("Reference color has {actual} channels but the image has {expected}")]
    ReferenceChannelMismatch { expected: usize, actual: usize },
}
