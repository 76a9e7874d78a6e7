pub mod mapper;
pub mod view;

pub use mapper::{map_to_source, undo_display_downscale, undo_zoom};
pub use view::{parse_zoom_percent, Dimensions, ViewTransform, ZOOM_PRESETS};
