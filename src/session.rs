//! The interactive sampling pipeline.
//!
//! A `PickerSession` owns the active source image, the view transform and the
//! ledger. Every pick runs to completion (map, decode, convert, append) before
//! returning, so callers never observe a half-applied sample.

use std::path::Path;

use anyhow::{Context, Result};
use image::{imageops::FilterType, RgbaImage};
use serde::Serialize;

use crate::color::{decode_pixel, rgb_to_hsv};
use crate::display;
use crate::error::{CaptureError, DecodeError, ExportError};
use crate::export::{self, ExportFormat};
use crate::ledger::SampleLedger;
use crate::mapping::{map_to_source, parse_zoom_percent, Dimensions, ViewTransform};
use crate::models::{ColorMode, ColorSample, NewSample, SourceImage};
use crate::sensing::{sample_screen, ScreenSource};
use crate::settings::PickerSettings;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info, log_warn};

struct ActiveSource {
    image: SourceImage,
    label: String,
}

/// What the UI needs after a load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadSummary {
    pub label: String,
    pub dimensions: Dimensions,
    pub display_dimensions: Option<Dimensions>,
    pub mode: String,
    pub status: String,
    pub resolution_note: Option<String>,
}

pub struct PickerSession {
    settings: PickerSettings,
    source: Option<ActiveSource>,
    view: ViewTransform,
    ledger: SampleLedger,
}

impl PickerSession {
    pub fn new(settings: PickerSettings) -> Self {
        Self {
            settings,
            source: None,
            view: ViewTransform::default(),
            ledger: SampleLedger::new(),
        }
    }

    pub fn settings(&self) -> &PickerSettings {
        &self.settings
    }

    /// Decodes an image file (format detection is left to the `image` crate)
    /// and makes it the active source.
    pub fn load_image(&mut self, path: &Path) -> Result<LoadSummary> {
        let decoded = image::open(path)
            .with_context(|| format!("failed to open image {}", path.display()))?;
        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(self.load_source(SourceImage::from_dynamic(decoded), label))
    }

    /// Replaces the active source wholesale and resets the view.
    pub fn load_source(&mut self, image: SourceImage, label: impl Into<String>) -> LoadSummary {
        let label = label.into();
        let dimensions = image.dimensions();
        self.view = ViewTransform::fit(dimensions, self.settings.max_display_dimension);

        let summary = LoadSummary {
            status: display::loaded_status(&label, dimensions),
            resolution_note: display::resolution_note(
                dimensions,
                self.settings.expected_resolution,
            ),
            display_dimensions: self.view.display_dimensions(dimensions),
            mode: image.mode().to_string(),
            dimensions,
            label: label.clone(),
        };

        log_info!(
            "Loaded {} ({}x{}, mode {}, display scale {:.3})",
            label,
            dimensions.0,
            dimensions.1,
            summary.mode,
            self.view.display_scale
        );
        self.source = Some(ActiveSource { image, label });
        summary
    }

    /// Freezes the current screen as the active source so it can be
    /// inspected like a loaded file.
    pub fn load_screen_capture(
        &mut self,
        screen: &dyn ScreenSource,
    ) -> Result<LoadSummary, CaptureError> {
        let snapshot = screen.capture()?;
        let label = self.settings.screen_capture_label.clone();
        Ok(self.load_source(SourceImage::truecolor(snapshot.into_rgb8()), label))
    }

    pub fn has_image(&self) -> bool {
        self.source.is_some()
    }

    pub fn source_dimensions(&self) -> Option<Dimensions> {
        self.source.as_ref().map(|source| source.image.dimensions())
    }

    pub fn source_mode(&self) -> Option<ColorMode> {
        self.source.as_ref().map(|source| source.image.mode())
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn set_zoom(&mut self, zoom_factor: f64) -> bool {
        self.view.set_zoom(zoom_factor)
    }

    /// Applies a preset label such as `"150%"`.
    pub fn set_zoom_label(&mut self, label: &str) -> bool {
        parse_zoom_percent(label).is_some_and(|factor| self.view.set_zoom(factor))
    }

    pub fn reset_zoom(&mut self) {
        self.view.reset_zoom();
    }

    /// Samples the source pixel under a canvas position.
    ///
    /// `pointer` is in scroll-adjusted canvas coordinates. Returns `Ok(None)`
    /// when no image is loaded or the position maps outside it; nothing is
    /// recorded in either case. A decode failure is returned and nothing is
    /// recorded.
    pub fn pick(&mut self, pointer: (f64, f64)) -> Result<Option<&ColorSample>, DecodeError> {
        let Some(source) = &self.source else {
            return Ok(None);
        };

        let source_dims = source.image.dimensions();
        let display_dims = self.view.display_dimensions(source_dims);
        let mapped = map_to_source(pointer, &self.view, source_dims, display_dims)
            .ok()
            .and_then(|(x, y)| ledger_position(x, y).map(|position| (x, y, position)));
        let Some((x, y, position)) = mapped else {
            log_debug!("pointer {:?} outside {}x{}", pointer, source_dims.0, source_dims.1);
            return Ok(None);
        };

        let rgb = decode_pixel(&source.image, x, y).inspect_err(|err| {
            log_warn!("failed to decode pixel ({x}, {y}) of {}: {err}", source.label);
        })?;

        let sample = NewSample {
            source_label: source.label.clone(),
            position,
            rgb,
            hsv: rgb_to_hsv(rgb),
        };
        Ok(Some(self.ledger.append(sample)))
    }

    /// Manual screen capture: samples the pixel under the global pointer and
    /// records it with the screen-capture label.
    pub fn capture_screen_sample(
        &mut self,
        screen: &dyn ScreenSource,
    ) -> Result<&ColorSample, CaptureError> {
        let live = sample_screen(screen)?;
        let sample = live.into_sample(&self.settings.screen_capture_label);
        Ok(self.ledger.append(sample))
    }

    pub fn ledger(&self) -> &SampleLedger {
        &self.ledger
    }

    pub fn latest(&self) -> Option<&ColorSample> {
        self.ledger.latest()
    }

    /// Clears the ledger; `confirmed` must carry the user's explicit yes.
    pub fn clear_ledger(&mut self, confirmed: bool) -> usize {
        let discarded = self.ledger.clear(confirmed);
        if discarded > 0 {
            log_info!("Cleared {} recorded samples", discarded);
        }
        discarded
    }

    /// Writes the ledger to `path`, picking the format from the extension
    /// unless `format` is given.
    pub fn export(
        &self,
        path: &Path,
        format: Option<ExportFormat>,
    ) -> Result<ExportFormat, ExportError> {
        let format = format
            .unwrap_or_else(|| export::format_for_path(path, self.settings.default_export_format));
        export::export_to_path(self.ledger.all(), format, path)?;
        Ok(format)
    }

    /// Downsampled RGBA copy for rendering, or the full raster when no
    /// downscale applies. Never used for sampling.
    pub fn display_image(&self) -> Result<Option<RgbaImage>, DecodeError> {
        let Some(source) = &self.source else {
            return Ok(None);
        };
        let full = source.image.to_rgba8()?;
        let copy = match self.view.display_dimensions(source.image.dimensions()) {
            Some((width, height)) => {
                image::imageops::resize(&full, width, height, FilterType::Triangle)
            }
            None => full,
        };
        Ok(Some(copy))
    }
}

/// Ledger positions are `i32`; a pixel beyond `i32::MAX` counts as out of
/// bounds.
fn ledger_position(x: u32, y: u32) -> Option<(i32, i32)> {
    Some((i32::try_from(x).ok()?, i32::try_from(y).ok()?))
}
