//! Application configuration

use anyhow::Result;
use rgb_marquee_types::{
    ClockSourceConfig, DailySourceConfig, JokesSourceConfig, NewsSourceConfig, QuoteSourceConfig,
    SensorSourceConfig, WeatherSourceConfig,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Current config format version
pub const CONFIG_VERSION: u32 = 1;

fn default_version() -> u32 {
    CONFIG_VERSION
}

/// Application-wide configuration, one section per concern
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Version of the config format
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub clock: ClockSourceConfig,
    #[serde(default)]
    pub sensor: SensorSourceConfig,
    #[serde(default)]
    pub weather: WeatherSourceConfig,
    #[serde(default)]
    pub quote: QuoteSourceConfig,
    #[serde(default)]
    pub jokes: JokesSourceConfig,
    #[serde(default)]
    pub news: NewsSourceConfig,
    #[serde(default)]
    pub daily: DailySourceConfig,
}

impl AppConfig {
    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::config_path()?;
        self.save_to_path(&config_path)?;
        Ok(config_path)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("org", "rgb-marquee", "rgb-marquee")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.json"))
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a specific file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            display: DisplayConfig::default(),
            clock: ClockSourceConfig::default(),
            sensor: SensorSourceConfig::default(),
            weather: WeatherSourceConfig::default(),
            quote: QuoteSourceConfig::default(),
            jokes: JokesSourceConfig::default(),
            news: NewsSourceConfig::default(),
            daily: DailySourceConfig::default(),
        }
    }
}

/// Panel geometry and frame timing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Scroll tick period
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// BDF font for the LED matrix surface
    #[serde(default = "default_font_path")]
    pub font_path: PathBuf,
    /// GPIO mapping passed to the matrix library ("regular", "adafruit-hat", ...)
    #[serde(default = "default_hardware_mapping")]
    pub hardware_mapping: String,
}

fn default_width() -> u32 {
    64
}

fn default_height() -> u32 {
    32
}

fn default_tick_ms() -> u64 {
    rgb_marquee_core::FRAME_INTERVAL_MS
}

fn default_font_path() -> PathBuf {
    PathBuf::from("fonts/7x13.bdf")
}

fn default_hardware_mapping() -> String {
    "adafruit-hat".to_string()
}

impl DisplayConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            tick_ms: default_tick_ms(),
            font_path: default_font_path(),
            hardware_mapping: default_hardware_mapping(),
        }
    }
}
