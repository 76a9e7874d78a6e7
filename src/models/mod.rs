mod color;
mod sample;
mod source_image;

pub use color::{Hsv, Rgb};
pub use sample::{ColorSample, NewSample, TIMESTAMP_FORMAT};
pub use source_image::{ColorMode, IndexedPixels, PixelStore, SourceImage};
