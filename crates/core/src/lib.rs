//! rgb-marquee-core: Content store, aggregation and scroll scheduling.
//!
//! This crate holds the shared content store the source workers publish
//! into, the aggregator that turns it into the two displayed sequences, and
//! the scroll scheduler that animates them onto a [`RenderSurface`].

pub mod aggregator;
pub mod constants;
pub mod content_store;
pub mod daily;
pub mod scroll;
pub mod surface;

pub use aggregator::{format_date, format_time, merge_by_priority, Aggregator};
pub use constants::{
    BOTTOM_BASELINE, BOTTOM_DEFAULT_COLOR, BOTTOM_PLACEHOLDER, FRAME_INTERVAL, FRAME_INTERVAL_MS,
    NEWS_WEATHER_REPEAT_THRESHOLD, TOP_BASELINE, TOP_DEFAULT_COLOR, TOP_PLACEHOLDER,
};
pub use content_store::{ContentStore, Snapshot};
pub use daily::DailyEvents;
pub use scroll::{Cursor, Line, ScrollScheduler};
pub use surface::RenderSurface;
