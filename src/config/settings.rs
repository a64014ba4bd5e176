//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::extract::ExtractOptions;

use super::AppPaths;

// ---------------------------------------------------------------------------
// PlaybackConfig
// ---------------------------------------------------------------------------

/// Settings for the playback transport.
///
/// The saved `wpm` is the rate the reader starts at; `min_wpm` / `max_wpm`
/// bound the `+` / `-` adjustment range and `wpm_step` is one key press.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Starting rate in words per minute.
    pub wpm: u32,
    /// Lowest selectable rate.
    pub min_wpm: u32,
    /// Highest selectable rate.
    pub max_wpm: u32,
    /// Rate change per adjustment key press.
    pub wpm_step: u32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            wpm: 350,
            min_wpm: 100,
            max_wpm: 1200,
            wpm_step: 25,
        }
    }
}

impl PlaybackConfig {
    /// `wpm` clamped into the configured range.
    pub fn clamp_wpm(&self, wpm: u32) -> u32 {
        wpm.clamp(self.min_wpm, self.max_wpm)
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// The `[extraction]` section is the pipeline's own
/// [`ExtractOptions`] type, so the saved knobs and the knobs the
/// extractor runs with can never drift apart.
///
/// # Persistence
///
/// ```rust,no_run
/// use rsvp_reader::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Playback transport settings.
    pub playback: PlaybackConfig,
    /// Extraction / OCR-fallback settings.
    pub extraction: ExtractOptions,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Verify that a default `AppConfig` can be serialised to TOML and
    /// deserialised back without any data loss.
    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original.playback.wpm, loaded.playback.wpm);
        assert_eq!(original.playback.min_wpm, loaded.playback.min_wpm);
        assert_eq!(original.playback.max_wpm, loaded.playback.max_wpm);
        assert_eq!(original.playback.wpm_step, loaded.playback.wpm_step);

        assert_eq!(
            original.extraction.ocr_page_limit,
            loaded.extraction.ocr_page_limit
        );
        assert_eq!(
            original.extraction.ocr_render_scale,
            loaded.extraction.ocr_render_scale
        );
        assert_eq!(
            original.extraction.ocr_language,
            loaded.extraction.ocr_language
        );
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        let default = AppConfig::default();

        assert_eq!(config.playback.wpm, default.playback.wpm);
        assert_eq!(
            config.extraction.ocr_page_limit,
            default.extraction.ocr_page_limit
        );
    }

    /// Verify default values.
    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.playback.wpm, 350);
        assert_eq!(cfg.playback.min_wpm, 100);
        assert_eq!(cfg.playback.max_wpm, 1200);
        assert_eq!(cfg.playback.wpm_step, 25);
        assert_eq!(cfg.extraction.ocr_page_limit, 20);
        assert!((cfg.extraction.ocr_render_scale - 2.0).abs() < f32::EPSILON);
        assert_eq!(cfg.extraction.ocr_language, "eng");
    }

    /// Verify that modified non-default values survive a round trip.
    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.playback.wpm = 625;
        cfg.extraction.ocr_page_limit = 50;
        cfg.extraction.ocr_render_scale = 1.5;
        cfg.extraction.ocr_language = "deu".into();

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.playback.wpm, 625);
        assert_eq!(loaded.extraction.ocr_page_limit, 50);
        assert!((loaded.extraction.ocr_render_scale - 1.5).abs() < f32::EPSILON);
        assert_eq!(loaded.extraction.ocr_language, "deu");
    }

    // ---- clamp_wpm ---

    #[test]
    fn clamp_wpm_respects_bounds() {
        let cfg = PlaybackConfig::default();
        assert_eq!(cfg.clamp_wpm(50), 100);
        assert_eq!(cfg.clamp_wpm(400), 400);
        assert_eq!(cfg.clamp_wpm(5000), 1200);
    }
}
