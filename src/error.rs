//! Error taxonomy for the sampling pipeline.
//!
//! Component seams return these typed errors; application glue (settings,
//! image loading, the CLI) wraps them in `anyhow` with context.

use thiserror::Error;

/// The mapped pointer falls outside the active source image.
///
/// Callers drop the event silently: no decode, no ledger append.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("pointer maps outside the source image")]
pub struct OutOfBounds;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A pixel layout the `image` crate added after this decoder was written;
    /// every layout it currently produces has a decode path.
    #[error("unsupported color mode: {0}")]
    UnsupportedMode(String),
    #[error("palette index {index} out of range (palette has {palette_len} entries)")]
    PaletteIndex { index: u8, palette_len: usize },
    #[error("corrupt raster: {0}")]
    Corrupt(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("screen capture unavailable: {0}")]
    Unavailable(String),
    #[error("pointer ({x}, {y}) outside captured screen {width}x{height}")]
    PointerOutside {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize JSON export: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write CSV export: {0}")]
    Csv(#[from] csv::Error),
    #[error("unknown export format '{0}'")]
    UnknownFormat(String),
}

#[derive(Debug, Error)]
pub enum SamplerError {
    #[error("screen sampler already running")]
    AlreadyRunning,
    #[error("screen sampler task failed to join: {0}")]
    Join(#[from] tokio::task::JoinError),
}
