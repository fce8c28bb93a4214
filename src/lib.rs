//! rgb-marquee: two-line scrolling ticker for a 64x32 RGB LED matrix
//!
//! The top line shows the time and date. The bottom line cycles through
//! calendar events, a quote of the day, the BME280 reading, jokes, the
//! weather and news headlines. This crate holds the application layer:
//! - Configuration (JSON, plus import of the legacy options file)
//! - Supervision of the source workers

pub mod config;
pub mod core;

pub use config::AppConfig;
pub use core::Supervisor;
