use image::DynamicImage;
use serde::Serialize;

use crate::color::{decode_pixel, rgb_to_hsv};
use crate::error::CaptureError;
use crate::models::{Hsv, NewSample, Rgb, SourceImage};

/// Platform screen access, implemented outside this crate. Permission
/// prompts and multi-display stitching are the implementor's concern.
pub trait ScreenSource: Send + Sync {
    /// Global pointer position in the coordinate space of `capture()`.
    fn pointer_position(&self) -> Result<(i32, i32), CaptureError>;

    /// Full-screen snapshot.
    fn capture(&self) -> Result<DynamicImage, CaptureError>;
}

/// One color read from the live screen, for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiveColor {
    pub position: (i32, i32),
    pub rgb: Rgb,
    pub hsv: Hsv,
    pub hex: String,
}

impl LiveColor {
    pub fn into_sample(self, source_label: &str) -> NewSample {
        NewSample {
            source_label: source_label.to_string(),
            position: self.position,
            rgb: self.rgb,
            hsv: self.hsv,
        }
    }
}

/// Snapshots the screen and reads the pixel under the global pointer.
///
/// The snapshot is flattened to plain truecolor first; screen alpha is
/// ignored rather than composited.
pub fn sample_screen(source: &dyn ScreenSource) -> Result<LiveColor, CaptureError> {
    let (x, y) = source.pointer_position()?;
    let snapshot = SourceImage::truecolor(source.capture()?.into_rgb8());
    let (width, height) = snapshot.dimensions();

    let (px, py) = match (u32::try_from(x), u32::try_from(y)) {
        (Ok(px), Ok(py)) if px < width && py < height => (px, py),
        _ => {
            return Err(CaptureError::PointerOutside {
                x,
                y,
                width,
                height,
            })
        }
    };

    let rgb = decode_pixel(&snapshot, px, py)?;
    Ok(LiveColor {
        position: (x, y),
        rgb,
        hsv: rgb_to_hsv(rgb),
        hex: rgb.hex(),
    })
}
