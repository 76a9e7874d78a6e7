//! Pointer → source-pixel coordinate mapping.
//!
//! Two inverse scalings are applied in a fixed order: zoom first, then the
//! display downscale. Each stage is its own function so the order stays
//! visible at the call site and each can be tested alone.

use super::view::{Dimensions, ViewTransform};
use crate::error::OutOfBounds;

/// Canvas coordinates → display-copy coordinates.
pub fn undo_zoom(pointer: (f64, f64), zoom_factor: f64) -> (f64, f64) {
    (pointer.0 / zoom_factor, pointer.1 / zoom_factor)
}

/// Display-copy coordinates → source coordinates. Identity when there is no
/// reduced display copy.
pub fn undo_display_downscale(
    display: (f64, f64),
    source_dims: Dimensions,
    display_dims: Option<Dimensions>,
) -> (f64, f64) {
    match display_dims {
        Some((display_w, display_h)) if display_w > 0 && display_h > 0 => (
            display.0 * (f64::from(source_dims.0) / f64::from(display_w)),
            display.1 * (f64::from(source_dims.1) / f64::from(display_h)),
        ),
        _ => display,
    }
}

/// Maps a scroll-adjusted canvas position to an in-bounds source pixel.
///
/// `source_dims` must come from the currently active image.
pub fn map_to_source(
    pointer: (f64, f64),
    view: &ViewTransform,
    source_dims: Dimensions,
    display_dims: Option<Dimensions>,
) -> Result<(u32, u32), OutOfBounds> {
    let display = undo_zoom(pointer, view.zoom_factor);
    let (sx, sy) = undo_display_downscale(display, source_dims, display_dims);
    check_bounds(sx, sy, source_dims)
}

fn check_bounds(x: f64, y: f64, (width, height): Dimensions) -> Result<(u32, u32), OutOfBounds> {
    // Negative input is outside even when truncation would land on 0.
    if !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
        return Err(OutOfBounds);
    }
    let (x, y) = (x.trunc(), y.trunc());
    if x < f64::from(width) && y < f64::from(height) {
        Ok((x as u32, y as u32))
    } else {
        Err(OutOfBounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zoomed(zoom_factor: f64, display_scale: f64) -> ViewTransform {
        ViewTransform {
            zoom_factor,
            display_scale,
        }
    }

    #[test]
    fn identity_at_unit_zoom_without_downscale() {
        let view = ViewTransform::default();
        assert_eq!(map_to_source((0.0, 0.0), &view, (100, 100), None), Ok((0, 0)));
        assert_eq!(map_to_source((37.9, 12.2), &view, (100, 100), None), Ok((37, 12)));
        assert_eq!(map_to_source((99.99, 99.0), &view, (100, 100), None), Ok((99, 99)));
    }

    #[test]
    fn compound_scaling_undoes_zoom_then_downscale() {
        let view = zoomed(2.0, 0.5);
        let mapped = map_to_source((400.0, 200.0), &view, (2000, 1000), Some((1000, 500)));
        assert_eq!(mapped, Ok((400, 200)));
    }

    #[test]
    fn stages_compose_in_order() {
        let display = undo_zoom((400.0, 200.0), 2.0);
        assert_eq!(display, (200.0, 100.0));
        let source = undo_display_downscale(display, (2000, 1000), Some((1000, 500)));
        assert_eq!(source, (400.0, 200.0));
        assert_eq!(undo_display_downscale(display, (2000, 1000), None), display);
    }

    #[test]
    fn zoom_only() {
        let view = zoomed(1.5, 1.0);
        assert_eq!(map_to_source((150.0, 75.0), &view, (1280, 1024), None), Ok((100, 50)));
        let view = zoomed(0.25, 1.0);
        assert_eq!(map_to_source((10.0, 10.0), &view, (1280, 1024), None), Ok((40, 40)));
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let view = ViewTransform::default();
        assert_eq!(map_to_source((100.0, 50.0), &view, (100, 100), None), Err(OutOfBounds));
        assert_eq!(map_to_source((-1.0, 10.0), &view, (100, 100), None), Err(OutOfBounds));
        assert_eq!(map_to_source((-0.5, 10.0), &view, (100, 100), None), Err(OutOfBounds));
        assert_eq!(map_to_source((10.0, 100.0), &view, (100, 100), None), Err(OutOfBounds));
    }

    #[test]
    fn zoomed_canvas_beyond_image_is_rejected() {
        let view = zoomed(2.0, 1.0);
        assert_eq!(map_to_source((199.0, 10.0), &view, (100, 100), None), Ok((99, 5)));
        assert_eq!(map_to_source((200.0, 10.0), &view, (100, 100), None), Err(OutOfBounds));
    }
}
