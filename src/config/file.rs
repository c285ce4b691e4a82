//! Configuration file management for waveview.
//!
//! This module handles loading and saving the TOML configuration file stored in
//! the user's config directory. Every section and field is optional; anything
//! left out falls back to the built-in defaults.

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::feed::DEFAULT_SAMPLE_INTERVAL;
use crate::wave::palette::{
    DEFAULT_BACKGROUND, DEFAULT_PEAK, DEFAULT_PRIMARY, DEFAULT_STROKE_WIDTH,
};
use crate::wave::state::DEFAULT_FREQUENCY;
use crate::wave::ticker::DEFAULT_TICK_INTERVAL;
use crate::wave::{CapacityPolicy, Palette, Rgb, Stroke, WaveSettings};

/// Wave shape configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WaveConfig {
    /// Height level (0-10). Amplitude is level * 20, levels above 10 clamp to 200.
    /// When neither level is set the amplitude defaults to 80, otherwise to level 8.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_level: Option<i32>,
    /// Speed level (0-10). Phase advances level / 8 per tick, levels above 10 use 0.25.
    /// When neither level is set the speed defaults to 0.5, otherwise to level 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_level: Option<i32>,
    /// Divisor turning pixels into radians. Lower values show more cycles.
    pub frequency: u32,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            height_level: None,
            speed_level: None,
            frequency: DEFAULT_FREQUENCY,
        }
    }
}

/// Colours used to paint the wave, as `#RRGGBB` strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PaletteConfig {
    pub background: Rgb,
    pub primary: Rgb,
    pub peak: Rgb,
    pub stroke_width: f32,
    /// Also stroke the secondary wave two thirds down the surface
    pub draw_peak: bool,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND,
            primary: DEFAULT_PRIMARY,
            peak: DEFAULT_PEAK,
            stroke_width: DEFAULT_STROKE_WIDTH,
            draw_peak: false,
        }
    }
}

/// Animation timing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    /// Milliseconds between animation ticks
    pub tick_interval_ms: u64,
    /// "lazy" trims the sample buffer on the next sample after a resize,
    /// "eager" trims it immediately
    pub capacity_policy: CapacityPolicy,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL.as_millis() as u64,
            capacity_policy: CapacityPolicy::default(),
        }
    }
}

/// Largest accepted width or height of one terminal cell, in surface pixels.
pub const MAX_CELL_PX: u32 = 1000;

/// Mapping from terminal cells to surface pixels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SurfaceConfig {
    pub cell_width_px: u32,
    pub cell_height_px: u32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            cell_width_px: 10,
            cell_height_px: 20,
        }
    }
}

/// Synthetic sample generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedConfig {
    /// Milliseconds between generated samples
    pub sample_interval_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: DEFAULT_SAMPLE_INTERVAL.as_millis() as u64,
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WaveViewConfig {
    pub wave: WaveConfig,
    pub palette: PaletteConfig,
    pub animation: AnimationConfig,
    pub surface: SurfaceConfig,
    pub feed: FeedConfig,
}

impl WaveViewConfig {
    /// Loads configuration from the user's config directory.
    ///
    /// Returns the defaults when no config file exists yet.
    ///
    /// # Errors
    /// - If the config directory cannot be determined
    /// - If the config file cannot be read
    /// - If the TOML is malformed or holds invalid values
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&get_config_path()?)
    }

    /// Loads configuration from `path`, falling back to defaults if it does not exist.
    ///
    /// # Errors
    /// - If the file cannot be read
    /// - If the TOML is malformed or holds invalid values
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read {}: {e}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| anyhow!("Invalid config {}: {e}", path.display()))?;
        tracing::debug!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    /// - If the TOML is malformed
    /// - If a value is out of range
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: WaveViewConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to `path`.
    ///
    /// # Errors
    /// - If the file cannot be written
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| anyhow!("Failed to write {}: {e}", path.display()))?;
        tracing::info!("Configuration saved to {}", path.display());
        Ok(())
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.wave.frequency == 0 {
            return Err(anyhow!("wave.frequency must be greater than zero"));
        }
        if self.animation.tick_interval_ms == 0 {
            return Err(anyhow!("animation.tick_interval_ms must be greater than zero"));
        }
        if self.surface.cell_width_px == 0 || self.surface.cell_height_px == 0 {
            return Err(anyhow!("surface cell sizes must be greater than zero"));
        }
        if self.surface.cell_width_px > MAX_CELL_PX || self.surface.cell_height_px > MAX_CELL_PX {
            return Err(anyhow!("surface cell sizes must be at most {MAX_CELL_PX} pixels"));
        }
        if !self.palette.stroke_width.is_finite() || self.palette.stroke_width <= 0.0 {
            return Err(anyhow!("palette.stroke_width must be a positive number"));
        }
        Ok(())
    }

    /// Animator settings described by this configuration.
    pub fn wave_settings(&self) -> WaveSettings {
        WaveSettings {
            frequency: self.wave.frequency,
            tick_interval: Duration::from_millis(self.animation.tick_interval_ms),
            capacity_policy: self.animation.capacity_policy,
            ..WaveSettings::from_levels(self.wave.height_level, self.wave.speed_level)
        }
    }

    pub fn palette(&self) -> Palette {
        Palette {
            background: self.palette.background,
            primary: Stroke::new(self.palette.primary, self.palette.stroke_width),
            peak: Stroke::new(self.palette.peak, self.palette.stroke_width),
            draw_peak: self.palette.draw_peak,
        }
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.feed.sample_interval_ms)
    }
}

/// Retrieves the path to the config file, creating its directory if needed.
///
/// # Errors
/// - If the home directory cannot be determined
/// - If the config directory cannot be created
pub fn get_config_path() -> anyhow::Result<PathBuf> {
    let config_dir = dirs::home_dir()
        .ok_or_else(|| anyhow!("Could not determine home directory"))?
        .join(".config")
        .join("waveview");

    fs::create_dir_all(&config_dir)
        .map_err(|e| anyhow!("Failed to create config directory: {e}"))?;

    Ok(config_dir.join("waveview.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = WaveViewConfig::from_toml_str("").unwrap();
        assert_eq!(config, WaveViewConfig::default());

        let settings = config.wave_settings();
        assert_eq!(settings.amplitude, 80);
        assert_eq!(settings.speed, 0.5);
        assert_eq!(settings.frequency, 180);
        assert_eq!(settings.tick_interval, Duration::from_millis(16));
        assert_eq!(settings.capacity_policy, CapacityPolicy::Lazy);
    }

    #[test]
    fn test_levels_and_policy_are_read() {
        let config = WaveViewConfig::from_toml_str(
            r#"
            [wave]
            height_level = 15
            speed_level = 4

            [animation]
            capacity_policy = "eager"
            "#,
        )
        .unwrap();

        let settings = config.wave_settings();
        assert_eq!(settings.amplitude, 200);
        assert_eq!(settings.speed, 0.5);
        assert_eq!(settings.capacity_policy, CapacityPolicy::Eager);
    }

    #[test]
    fn test_single_level_uses_level_default_for_the_other() {
        let config = WaveViewConfig::from_toml_str("[wave]\nspeed_level = 8").unwrap();
        let settings = config.wave_settings();
        assert_eq!(settings.amplitude, 160);
        assert_eq!(settings.speed, 1.0);
    }

    #[test]
    fn test_palette_is_read() {
        let config = WaveViewConfig::from_toml_str(
            r##"
            [palette]
            primary = "#FF0000"
            draw_peak = true
            stroke_width = 3.5
            "##,
        )
        .unwrap();

        let palette = config.palette();
        assert_eq!(palette.primary.color, Rgb::new(0xFF, 0, 0));
        assert_eq!(palette.primary.width, 3.5);
        assert_eq!(palette.background, DEFAULT_BACKGROUND);
        assert!(palette.draw_peak);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(WaveViewConfig::from_toml_str("[wave]\nfrequency = 0").is_err());
        assert!(WaveViewConfig::from_toml_str("[animation]\ntick_interval_ms = 0").is_err());
        assert!(WaveViewConfig::from_toml_str("[surface]\ncell_width_px = 0").is_err());
        assert!(WaveViewConfig::from_toml_str("[surface]\ncell_width_px = 100000000").is_err());
        assert!(WaveViewConfig::from_toml_str("[surface]\ncell_height_px = 1001").is_err());
        assert!(WaveViewConfig::from_toml_str("[surface]\ncell_height_px = 1000").is_ok());
        assert!(WaveViewConfig::from_toml_str("[palette]\nstroke_width = -1.0").is_err());
        assert!(WaveViewConfig::from_toml_str("[palette]\nprimary = \"blue\"").is_err());
        assert!(WaveViewConfig::from_toml_str("[animation]\ncapacity_policy = \"never\"").is_err());
        assert!(WaveViewConfig::from_toml_str("[wave").is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = std::env::temp_dir().join(format!("waveview-config-{}.toml", std::process::id()));
        let mut config = WaveViewConfig::default();
        config.wave.height_level = Some(6);
        config.palette.draw_peak = true;

        config.save_to(&path).unwrap();
        let loaded = WaveViewConfig::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("waveview-config-does-not-exist.toml");
        assert_eq!(WaveViewConfig::load_from(&path).unwrap(), WaveViewConfig::default());
    }
}
