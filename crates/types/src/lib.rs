//! rgb-marquee-types: Shared data types for the rgb-marquee ticker.
//!
//! This crate contains pure data types (colours, messages, source names and
//! per-source configuration) shared across all rgb-marquee crates. Nothing
//! here touches hardware, the network or the clock.

pub mod color;
pub mod message;
pub mod source_configs;

// Re-export commonly used types at the crate root for convenience
pub use color::{Rgb, BRIGHT_CHANNEL_MIN};
pub use message::{Message, SourceKind, SourceList};
pub use source_configs::{
    ClockSourceConfig, DailySourceConfig, DayWindow, FloatingRule, HolidayWindows,
    JokesSourceConfig, NewsSourceConfig, QuoteSourceConfig, SensorSourceConfig, TemperatureUnit,
    TimeFormat, WeatherSourceConfig,
};
