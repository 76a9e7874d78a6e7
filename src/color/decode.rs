use image::{DynamicImage, GenericImageView};

use crate::error::DecodeError;
use crate::models::{PixelStore, Rgb, SourceImage};

/// Reads the pixel at `(x, y)` and normalizes it to an opaque 8-bit RGB triple.
///
/// Coordinates must already be validated against the image dimensions.
pub fn decode_pixel(image: &SourceImage, x: u32, y: u32) -> Result<Rgb, DecodeError> {
    match image.pixels() {
        PixelStore::Truecolor(buffer) => Ok(Rgb::from(buffer.get_pixel(x, y).0)),
        PixelStore::TruecolorAlpha(buffer) => {
            let [r, g, b, a] = buffer.get_pixel(x, y).0;
            Ok(composite_over_white(Rgb::new(r, g, b), a))
        }
        PixelStore::Grayscale(buffer) => {
            let [level] = buffer.get_pixel(x, y).0;
            Ok(Rgb::new(level, level, level))
        }
        PixelStore::Indexed(indexed) => indexed.resolve(indexed.index_at(x, y)),
        PixelStore::Other(dynamic) => decode_converted(dynamic, x, y),
    }
}

/// Blends a straight-alpha color onto opaque white.
pub fn composite_over_white(color: Rgb, alpha: u8) -> Rgb {
    let coverage = f64::from(alpha) / 255.0;
    let blend = |channel: u8| -> u8 {
        (f64::from(channel) * coverage + 255.0 * (1.0 - coverage))
            .round()
            .clamp(0.0, 255.0) as u8
    };
    Rgb::new(blend(color.r), blend(color.g), blend(color.b))
}

fn decode_converted(image: &DynamicImage, x: u32, y: u32) -> Result<Rgb, DecodeError> {
    match image {
        DynamicImage::ImageLumaA8(_)
        | DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_)
        | DynamicImage::ImageRgb16(_)
        | DynamicImage::ImageRgba16(_)
        | DynamicImage::ImageRgb32F(_)
        | DynamicImage::ImageRgba32F(_)
        | DynamicImage::ImageRgb8(_)
        | DynamicImage::ImageRgba8(_)
        | DynamicImage::ImageLuma8(_) => {
            // Layouts without alpha convert with a = 255, which composites
            // to the color itself.
            let [r, g, b, a] = image.get_pixel(x, y).0;
            Ok(composite_over_white(Rgb::new(r, g, b), a))
        }
        other => Err(DecodeError::UnsupportedMode(format!("{:?}", other.color()))),
    }
}
