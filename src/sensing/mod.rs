pub mod controller;
pub mod loop_worker;
pub mod screen;

pub use controller::{SamplerController, SamplerStatus};
pub use loop_worker::{LiveReading, SamplerConfig};
pub use screen::{sample_screen, LiveColor, ScreenSource};
