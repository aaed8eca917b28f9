mod error;
mod trimap_ops;
mod utils;

#[cfg(test)]
mod test_utils;

use image::{ImageBuffer, Pixel};

pub use error::Error;
pub use trimap_ops::flood_fill::{
    flood_fill, flood_fill_background, flood_fill_interleaved, FloodFillExt, FloodFillOptions,
    TraversalOrder,
};
pub use trimap_ops::mask::Mask;
pub use trimap_ops::morphology::{
    dilate_interleaved, dilate_naive, dilate_separable, erode_interleaved, erode_naive,
    erode_separable, morph, Boundary, Morphology, MorphologyOp, MorphologyOptions,
    MorphologyVariant,
};
pub use trimap_ops::pipeline::{TrimapConfig, TrimapExt, TrimapResult};
pub use trimap_ops::pixel_buffer::PixelBuffer;
pub use trimap_ops::similarity::{
    luminance, ChannelDistance, Corner, LuminanceDistance, ReferenceColor, SimilarityMetric,
    SimilarityPredicate,
};
pub use trimap_ops::trimap::{
    generate_trimap, trimap_from_flood_fill, Trimap, TrimapClass, TrimapCounts, TrimapOptions,
};

pub type Image<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;
