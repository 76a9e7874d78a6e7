//! Color sample records.
//!
//! A `ColorSample` is created only by the ledger, which assigns its sequence
//! number and timestamp; afterwards it is read-only.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::{Hsv, Rgb};

/// Timestamp layout shared by display strings and every export format.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The fields a caller supplies when appending to the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSample {
    pub source_label: String,
    pub position: (i32, i32),
    pub rgb: Rgb,
    pub hsv: Hsv,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ColorSample {
    sequence: u32,
    timestamp: NaiveDateTime,
    source_label: String,
    position: (i32, i32),
    rgb: Rgb,
    hsv: Hsv,
    hex: String,
}

impl ColorSample {
    pub(crate) fn new(sequence: u32, timestamp: NaiveDateTime, sample: NewSample) -> Self {
        let hex = sample.rgb.hex();
        Self {
            sequence,
            timestamp,
            source_label: sample.source_label,
            position: sample.position,
            rgb: sample.rgb,
            hsv: sample.hsv,
            hex,
        }
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn timestamp_string(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    pub fn position(&self) -> (i32, i32) {
        self.position
    }

    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    pub fn hsv(&self) -> Hsv {
        self.hsv
    }

    pub fn hex(&self) -> &str {
        &self.hex
    }
}
