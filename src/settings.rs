use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::PathBuf,
    sync::{PoisonError, RwLock},
    time::Duration,
};

use crate::export::ExportFormat;
use crate::mapping::ZOOM_PRESETS;
use crate::sensing::SamplerConfig;

/// Overrides `sample_interval_ms` when set to a positive integer.
pub const SAMPLE_INTERVAL_ENV: &str = "PIXEL_PICKER_SAMPLE_MS";

pub const DEFAULT_SCREEN_CAPTURE_LABEL: &str = "屏幕截图";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PickerSettings {
    /// Longest display side before a downscaled display copy is made.
    pub max_display_dimension: u32,
    pub sample_interval_ms: u64,
    pub max_consecutive_failures: u32,
    pub zoom_presets: Vec<u32>,
    /// `source_label` recorded for screen samples.
    pub screen_capture_label: String,
    pub default_export_format: ExportFormat,
    /// Resolution the status line expects; other sizes get a note.
    pub expected_resolution: Option<(u32, u32)>,
}

impl Default for PickerSettings {
    fn default() -> Self {
        Self {
            max_display_dimension: 1600,
            sample_interval_ms: 50,
            max_consecutive_failures: 40,
            zoom_presets: ZOOM_PRESETS.to_vec(),
            screen_capture_label: DEFAULT_SCREEN_CAPTURE_LABEL.into(),
            default_export_format: ExportFormat::Json,
            expected_resolution: Some((1280, 1024)),
        }
    }
}

impl PickerSettings {
    pub fn sampler_config(&self) -> SamplerConfig {
        let interval_ms = std::env::var(SAMPLE_INTERVAL_ENV)
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(self.sample_interval_ms)
            .max(1);

        SamplerConfig {
            interval: Duration::from_millis(interval_ms),
            max_consecutive_failures: self.max_consecutive_failures,
        }
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<PickerSettings>,
}

impl SettingsStore {
    /// Loads settings from `path`. A missing file yields defaults; a
    /// malformed one is logged and replaced by defaults.
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                warn!("Ignoring malformed settings in {}: {err}", path.display());
                PickerSettings::default()
            })
        } else {
            PickerSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn settings(&self) -> PickerSettings {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn update(&self, settings: PickerSettings) -> Result<()> {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        self.persist(&settings)?;
        *guard = settings;
        Ok(())
    }

    fn persist(&self, data: &PickerSettings) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create settings directory {}", parent.display())
            })?;
        }
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("pixel-picker-settings-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn missing_file_gives_defaults() {
        let store = SettingsStore::new(scratch("absent.json")).unwrap();
        assert_eq!(store.settings(), PickerSettings::default());
    }

    #[test]
    fn update_persists_and_reloads() {
        let path = scratch("roundtrip.json");
        let store = SettingsStore::new(path.clone()).unwrap();
        let mut settings = store.settings();
        settings.max_display_dimension = 800;
        settings.default_export_format = ExportFormat::Csv;
        store.update(settings.clone()).unwrap();

        let reloaded = SettingsStore::new(path.clone()).unwrap();
        assert_eq!(reloaded.settings(), settings);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn partial_and_malformed_files_fall_back_to_defaults() {
        let partial = scratch("partial.json");
        fs::create_dir_all(partial.parent().unwrap()).unwrap();
        fs::write(&partial, r#"{"sample_interval_ms": 20}"#).unwrap();
        let settings = SettingsStore::new(partial.clone()).unwrap().settings();
        assert_eq!(settings.sample_interval_ms, 20);
        assert_eq!(settings.max_display_dimension, 1600);

        let broken = scratch("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert_eq!(
            SettingsStore::new(broken.clone()).unwrap().settings(),
            PickerSettings::default()
        );

        fs::remove_file(partial).unwrap();
        fs::remove_file(broken).unwrap();
    }

    #[test]
    fn sampler_config_uses_interval_and_cap() {
        let settings = PickerSettings {
            sample_interval_ms: 75,
            max_consecutive_failures: 9,
            ..PickerSettings::default()
        };
        let config = settings.sampler_config();
        assert_eq!(config.max_consecutive_failures, 9);
        if std::env::var(SAMPLE_INTERVAL_ENV).is_err() {
            assert_eq!(config.interval, Duration::from_millis(75));
        }
    }
}
