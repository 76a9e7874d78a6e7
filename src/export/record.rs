use std::{fmt, str::FromStr};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::ExportError;
use crate::models::{ColorSample, TIMESTAMP_FORMAT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
    Xml,
    Txt,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Json,
        ExportFormat::Csv,
        ExportFormat::Xml,
        ExportFormat::Txt,
    ];

    /// Tag written into every export's header metadata.
    pub fn tag(&self) -> &'static str {
        match self {
            ExportFormat::Json => "JSON",
            ExportFormat::Csv => "CSV",
            ExportFormat::Xml => "XML",
            ExportFormat::Txt => "TXT",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Xml => "xml",
            ExportFormat::Txt => "txt",
        }
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(extension))
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_extension(value.trim().trim_start_matches('.'))
            .ok_or_else(|| ExportError::UnknownFormat(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportInfo {
    pub timestamp: String,
    pub total_records: usize,
    pub format: String,
}

impl ExportInfo {
    pub fn new(format: ExportFormat, exported_at: NaiveDateTime, total_records: usize) -> Self {
        Self {
            timestamp: exported_at.format(TIMESTAMP_FORMAT).to_string(),
            total_records,
            format: format.tag().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionFields {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbFields {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvFields {
    pub h: u16,
    pub s: u8,
    pub v: u8,
}

/// The one record shape every renderer draws from. Field order here is the
/// JSON key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub sequence: u32,
    pub timestamp: String,
    pub image_file: String,
    pub position: PositionFields,
    pub rgb: RgbFields,
    pub hsv: HsvFields,
    pub hex: String,
}

impl From<&ColorSample> for ExportRecord {
    fn from(sample: &ColorSample) -> Self {
        let (x, y) = sample.position();
        let rgb = sample.rgb();
        let hsv = sample.hsv();
        Self {
            sequence: sample.sequence(),
            timestamp: sample.timestamp_string(),
            image_file: sample.source_label().to_string(),
            position: PositionFields { x, y },
            rgb: RgbFields {
                r: rgb.r,
                g: rgb.g,
                b: rgb.b,
            },
            hsv: HsvFields {
                h: hsv.h,
                s: hsv.s,
                v: hsv.v,
            },
            hex: sample.hex().to_string(),
        }
    }
}

pub fn to_records(samples: &[ColorSample]) -> Vec<ExportRecord> {
    samples.iter().map(ExportRecord::from).collect()
}
