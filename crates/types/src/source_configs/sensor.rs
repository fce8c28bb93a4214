//! BME280 environmental sensor configuration types.

use serde::{Deserialize, Serialize};

/// Temperature units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TemperatureUnit {
    Celsius,
    #[default]
    Fahrenheit,
}

impl TemperatureUnit {
    /// Convert from degrees Celsius into this unit
    pub fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_bus_path() -> String {
    "/dev/i2c-1".to_string()
}

fn default_address() -> u8 {
    0x76
}

fn default_update_interval() -> u64 {
    600
}

/// Sensor source configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SensorSourceConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// I2C character device the sensor hangs off
    #[serde(default = "default_bus_path")]
    pub bus_path: String,
    /// 7-bit I2C address (0x76 or 0x77)
    #[serde(default = "default_address")]
    pub address: u8,
    #[serde(default = "default_update_interval")]
    pub update_interval_secs: u64,
    #[serde(default = "default_enabled")]
    pub temperature: bool,
    #[serde(default = "default_enabled")]
    pub humidity: bool,
    #[serde(default = "default_enabled")]
    pub pressure: bool,
    #[serde(default)]
    pub temp_unit: TemperatureUnit,
}

impl SensorSourceConfig {
    /// At least one metric would end up in the summary message
    pub fn has_metrics(&self) -> bool {
        self.temperature || self.humidity || self.pressure
    }
}

impl Default for SensorSourceConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            bus_path: default_bus_path(),
            address: default_address(),
            update_interval_secs: default_update_interval(),
            temperature: true,
            humidity: true,
            pressure: true,
            temp_unit: TemperatureUnit::Fahrenheit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversion() {
        assert!((TemperatureUnit::Fahrenheit.from_celsius(100.0) - 212.0).abs() < 1e-9);
        assert!((TemperatureUnit::Celsius.from_celsius(21.5) - 21.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_json_is_default() {
        let config: SensorSourceConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SensorSourceConfig::default());
        assert_eq!(config.address, 0x76);
    }
}
