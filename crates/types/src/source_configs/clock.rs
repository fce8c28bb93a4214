//! Clock (top line) configuration types.

use serde::{Deserialize, Serialize};

/// Time format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TimeFormat {
    /// `HH:MM`, what the options file calls "military" time
    #[serde(rename = "24h")]
    Hour24,
    /// `h:mm:ss` with 0 shown as 12
    #[serde(rename = "12h")]
    #[default]
    Hour12,
}

/// Clock source configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClockSourceConfig {
    #[serde(default)]
    pub time_format: TimeFormat,
}
