pub mod decode;
pub mod hsv;

pub use decode::{composite_over_white, decode_pixel};
pub use hsv::rgb_to_hsv;
