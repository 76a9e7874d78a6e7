//! Strings handed to the UI for display.

use serde::Serialize;

use crate::mapping::Dimensions;
use crate::models::{ColorSample, Hsv, Rgb};
use crate::sensing::LiveColor;

pub fn coordinate_label(x: i32, y: i32) -> String {
    format!("X: {x}, Y: {y}")
}

pub fn hue_label(h: u16) -> String {
    format!("{h}°")
}

pub fn percent_label(value: u8) -> String {
    format!("{value}%")
}

pub fn status_line(rgb: Rgb, hsv: Hsv) -> String {
    format!(
        "颜色: RGB({},{},{}) HSV({}°,{}%,{}%)",
        rgb.r, rgb.g, rgb.b, hsv.h, hsv.s, hsv.v
    )
}

pub fn loaded_status(label: &str, (width, height): Dimensions) -> String {
    format!("已加载: {label} ({width}x{height})")
}

/// Note shown when a loaded image is not the resolution the user expects.
pub fn resolution_note(actual: Dimensions, expected: Option<Dimensions>) -> Option<String> {
    let (ew, eh) = expected?;
    (actual != (ew, eh)).then(|| {
        format!(
            "图像分辨率为 {}x{}，不是期望的 {ew}x{eh}。",
            actual.0, actual.1
        )
    })
}

pub fn ledger_count_label(count: usize) -> String {
    format!("已记录: {count} 个点")
}

/// Everything the color panel shows for one reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorReadout {
    pub coordinates: String,
    pub r: String,
    pub g: String,
    pub b: String,
    pub hex: String,
    pub h: String,
    pub s: String,
    pub v: String,
    pub status: String,
}

impl ColorReadout {
    pub fn new(position: (i32, i32), rgb: Rgb, hsv: Hsv) -> Self {
        Self {
            coordinates: coordinate_label(position.0, position.1),
            r: rgb.r.to_string(),
            g: rgb.g.to_string(),
            b: rgb.b.to_string(),
            hex: rgb.hex(),
            h: hue_label(hsv.h),
            s: percent_label(hsv.s),
            v: percent_label(hsv.v),
            status: status_line(rgb, hsv),
        }
    }
}

impl From<&ColorSample> for ColorReadout {
    fn from(sample: &ColorSample) -> Self {
        Self::new(sample.position(), sample.rgb(), sample.hsv())
    }
}

impl From<&LiveColor> for ColorReadout {
    fn from(live: &LiveColor) -> Self {
        Self::new(live.position, live.rgb, live.hsv)
    }
}
