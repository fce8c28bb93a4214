//! Source configuration types for all content sources.

pub mod clock;
pub mod daily;
pub mod feeds;
pub mod sensor;

// Re-export all source config types for convenience
pub use clock::{ClockSourceConfig, TimeFormat};
pub use daily::{DailySourceConfig, DayWindow, FloatingRule, HolidayWindows};
pub use feeds::{JokesSourceConfig, NewsSourceConfig, QuoteSourceConfig, WeatherSourceConfig};
pub use sensor::{SensorSourceConfig, TemperatureUnit};
