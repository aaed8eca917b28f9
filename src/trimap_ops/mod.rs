pub mod flood_fill;
pub mod mask;
pub mod morphology;
pub mod pipeline;
pub mod pixel_buffer;
pub mod similarity;
pub mod trimap;
