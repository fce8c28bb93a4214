//! rgb-marquee-sources: Content producers for the rgb-marquee ticker.
//!
//! The BME280 reader, the network feed workers (weather, quote, jokes,
//! news) and the daily holiday/birthday loader. Workers publish into the
//! shared [`rgb_marquee_core::ContentStore`]; none of their failures escape
//! to the caller other than as logged, typed errors.

pub mod bme280;
pub mod daily;
pub mod error;
pub mod feeds;

pub use bme280::{Bme280, Calibration, I2cBus, Measurement, RawSample, SensorBus, SensorReader};
pub use daily::{load_document, parse_items, DailyEventsLoader, DailyItem, DayRule};
pub use error::{DailyError, FeedError, SensorError};
pub use feeds::{
    FeedParser, FeedWorker, Fetch, HttpFetcher, JokesParser, NewsParser, QuoteParser,
    WeatherParser,
};
