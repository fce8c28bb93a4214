//! Shared constants for frame timing, line layout and bottom-line merging.

use rgb_marquee_types::Rgb;
use std::time::Duration;

/// Frame period of the scroll loop (40 fps)
pub const FRAME_INTERVAL_MS: u64 = 25;

/// Frame period as a Duration
pub const FRAME_INTERVAL: Duration = Duration::from_millis(FRAME_INTERVAL_MS);

/// Baseline row of the top line on a 32-row panel (two rows left for descenders)
pub const TOP_BASELINE: i32 = 11;

/// Baseline row of the bottom line on a 32-row panel
pub const BOTTOM_BASELINE: i32 = 28;

/// Shown on the top line until the first clock rebuild lands
pub const TOP_PLACEHOLDER: &str = "Please Wait for Raspberry Pi to boot";

/// Shown on the bottom line while every source is still empty
pub const BOTTOM_PLACEHOLDER: &str = "Please Wait while I gather information from the Internet";

/// Placeholder colour for the top line
pub const TOP_DEFAULT_COLOR: Rgb = Rgb::YELLOW;

/// Placeholder colour for the bottom line
pub const BOTTOM_DEFAULT_COLOR: Rgb = Rgb::BLUE;

/// Above this many headlines the weather list is repeated on the bottom line
pub const NEWS_WEATHER_REPEAT_THRESHOLD: usize = 10;
