pub mod cli;
pub mod color;
pub mod display;
pub mod error;
pub mod export;
pub mod ledger;
pub mod mapping;
pub mod models;
pub mod sensing;
pub mod session;
pub mod settings;
mod utils;

pub use color::{composite_over_white, decode_pixel, rgb_to_hsv};
pub use error::{CaptureError, DecodeError, ExportError, OutOfBounds, SamplerError};
pub use export::{export, export_to_path, ExportFormat};
pub use ledger::SampleLedger;
pub use mapping::{map_to_source, ViewTransform};
pub use models::{ColorMode, ColorSample, Hsv, Rgb, SourceImage};
pub use sensing::{LiveColor, LiveReading, SamplerController, ScreenSource};
pub use session::{LoadSummary, PickerSession};
pub use settings::{PickerSettings, SettingsStore};

pub fn run() -> anyhow::Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Pixel picker starting up...");

    let cli = cli::parse_args();
    cli::execute(cli)
}
