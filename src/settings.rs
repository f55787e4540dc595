//! User-facing settings persisted as JSON between runs.

use std::fs;
use std::io;
use std::ops::RangeInclusive;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::audio::DEFAULT_VOLUME;

pub const SETTINGS_PATH: &str = "snake_settings.json";
pub const SPEED_RANGE: RangeInclusive<u32> = 1..=20;
pub const DENSITY_RANGE: RangeInclusive<u32> = 10..=40;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("settings file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub speed: u32,
    /// Number of grid columns.
    pub density: u32,
    pub muted: bool,
    pub volume: f32,
    /// Directory holding `eat.wav`, `gameover.wav`, `move.wav` and `bgloop.wav`.
    pub sound_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speed: 8,
            density: 20,
            muted: false,
            volume: DEFAULT_VOLUME,
            sound_dir: "assets/sounds".to_string(),
        }
    }
}

pub fn clamp_speed(speed: u32) -> u32 {
    speed.clamp(*SPEED_RANGE.start(), *SPEED_RANGE.end())
}

pub fn clamp_density(density: u32) -> u32 {
    density.clamp(*DENSITY_RANGE.start(), *DENSITY_RANGE.end())
}

impl Settings {
    /// Pulls every value back into its UI range.
    pub fn sanitized(mut self) -> Self {
        self.speed = clamp_speed(self.speed);
        self.density = clamp_density(self.density);
        self.volume = if self.volume.is_finite() { self.volume.clamp(0.0, 1.0) } else { DEFAULT_VOLUME };
        self
    }

    /// A missing file yields defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&text)?;
        Ok(settings.sanitized())
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path.as_ref()).unwrap_or_else(|err| {
            warn!("using default settings, {} unreadable: {}", path.as_ref().display(), err);
            Self::default()
        })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("retro_snake_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn missing_file_gives_defaults() {
        let settings = Settings::load(temp_path("missing")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "speed": 12 }"#).unwrap();
        assert_eq!(settings.speed, 12);
        assert_eq!(settings.density, 20);
        assert_eq!(settings.sound_dir, "assets/sounds");
    }

    #[test]
    fn out_of_range_values_are_clamped_on_load() {
        let path = temp_path("clamp");
        fs::write(&path, r#"{ "speed": 99, "density": 2, "volume": 3.5 }"#).unwrap();
        let settings = Settings::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(settings.speed, 20);
        assert_eq!(settings.density, 10);
        assert_eq!(settings.volume, 1.0);
    }

    #[test]
    fn save_then_load_keeps_values() {
        let path = temp_path("save");
        let settings = Settings { speed: 3, density: 33, muted: true, volume: 0.25, ..Settings::default() };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let path = temp_path("garbage");
        fs::write(&path, "not json").unwrap();
        let err = Settings::load(&path).unwrap_err();
        let _ = fs::remove_file(&path);
        assert!(matches!(err, SettingsError::Parse(_)));
        assert_eq!(Settings::load_or_default(temp_path("missing_too")), Settings::default());
    }
}
