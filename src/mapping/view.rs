use serde::{Deserialize, Serialize};

/// Width and height in pixels.
pub type Dimensions = (u32, u32);

/// Zoom presets offered to the user, in percent.
pub const ZOOM_PRESETS: [u32; 7] = [25, 50, 75, 100, 125, 150, 200];

/// How the source image is currently presented on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    /// User-selected magnification, `1.0` = 100%.
    pub zoom_factor: f64,
    /// Downscale applied to the display copy, `1.0` when the source fits.
    pub display_scale: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            zoom_factor: 1.0,
            display_scale: 1.0,
        }
    }
}

impl ViewTransform {
    /// Picks the display scale so the longer side of `source` fits within
    /// `max_display_dimension`. Zoom starts at 100%.
    pub fn fit(source: Dimensions, max_display_dimension: u32) -> Self {
        let longest = source.0.max(source.1);
        let display_scale = if max_display_dimension > 0 && longest > max_display_dimension {
            f64::from(max_display_dimension) / f64::from(longest)
        } else {
            1.0
        };
        Self {
            zoom_factor: 1.0,
            display_scale,
        }
    }

    pub fn is_downscaled(&self) -> bool {
        self.display_scale < 1.0
    }

    /// Dimensions of the display copy for a source of `source` size, or
    /// `None` when the source is displayed at full resolution.
    pub fn display_dimensions(&self, source: Dimensions) -> Option<Dimensions> {
        if !self.is_downscaled() {
            return None;
        }
        let scale = |side: u32| ((f64::from(side) * self.display_scale) as u32).max(1);
        Some((scale(source.0), scale(source.1)))
    }

    /// Sets zoom; non-positive or non-finite factors are ignored.
    pub fn set_zoom(&mut self, zoom_factor: f64) -> bool {
        if zoom_factor.is_finite() && zoom_factor > 0.0 {
            self.zoom_factor = zoom_factor;
            true
        } else {
            false
        }
    }

    pub fn reset_zoom(&mut self) {
        self.zoom_factor = 1.0;
    }
}

/// Parses a zoom label such as `"150%"` (or a bare `"150"`) into a factor.
pub fn parse_zoom_percent(label: &str) -> Option<f64> {
    let percent: f64 = label.trim().trim_end_matches('%').trim().parse().ok()?;
    (percent.is_finite() && percent > 0.0).then_some(percent / 100.0)
}
