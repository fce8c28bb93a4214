//! Configuration types for the network feeds (weather, quote, jokes, news).

use super::sensor::TemperatureUnit;
use serde::{Deserialize, Serialize};

fn default_weather_interval() -> u64 {
    900
}

fn default_quote_interval() -> u64 {
    3600
}

fn default_jokes_interval() -> u64 {
    3600
}

fn default_news_interval() -> u64 {
    1800
}

/// OpenWeatherMap current-conditions feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherSourceConfig {
    #[serde(default)]
    pub enabled: bool,
    /// OpenWeatherMap APPID
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default = "default_weather_interval")]
    pub update_interval_secs: u64,
    #[serde(default)]
    pub temp_unit: TemperatureUnit,
}

impl WeatherSourceConfig {
    /// Enabled and has everything needed to build a request
    pub fn is_runnable(&self) -> bool {
        self.enabled && !self.api_key.is_empty() && !self.zip.is_empty()
    }

    pub fn endpoint(&self) -> String {
        format!(
            "http://api.openweathermap.org/data/2.5/weather?zip={}&APPID={}",
            self.zip, self.api_key
        )
    }
}

impl Default for WeatherSourceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: String::new(),
            zip: String::new(),
            update_interval_secs: default_weather_interval(),
            temp_unit: TemperatureUnit::Fahrenheit,
        }
    }
}

/// Quote-of-the-day feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuoteSourceConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_quote_interval")]
    pub update_interval_secs: u64,
}

impl QuoteSourceConfig {
    pub fn is_runnable(&self) -> bool {
        self.enabled && !self.url.is_empty()
    }
}

impl Default for QuoteSourceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: String::new(),
            update_interval_secs: default_quote_interval(),
        }
    }
}

/// Jokes feed, one URL per category, visited round-robin
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JokesSourceConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub urls: Vec<String>,
    /// Zero selects the 20 minute fallback
    #[serde(default = "default_jokes_interval")]
    pub update_interval_secs: u64,
}

impl JokesSourceConfig {
    pub const FALLBACK_INTERVAL_SECS: u64 = 1200;

    pub fn is_runnable(&self) -> bool {
        self.enabled && !self.urls.is_empty()
    }

    pub fn effective_interval_secs(&self) -> u64 {
        if self.update_interval_secs == 0 {
            Self::FALLBACK_INTERVAL_SECS
        } else {
            self.update_interval_secs
        }
    }
}

impl Default for JokesSourceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            urls: Vec::new(),
            update_interval_secs: default_jokes_interval(),
        }
    }
}

/// Headline feed, one URL per provider, visited round-robin
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsSourceConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default = "default_news_interval")]
    pub update_interval_secs: u64,
}

impl NewsSourceConfig {
    pub fn is_runnable(&self) -> bool {
        self.enabled && !self.urls.is_empty()
    }
}

impl Default for NewsSourceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            urls: Vec::new(),
            update_interval_secs: default_news_interval(),
        }
    }
}
