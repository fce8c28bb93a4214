//! Daily events hook used by the top-line rebuild

use chrono::NaiveDate;
use rgb_marquee_types::SourceList;

/// Loads the date-bound messages (holidays, birthdays) for one day.
///
/// Called from the render thread whenever the weekday changes, outside the
/// content store lock. Implementations swallow their own errors: a missing
/// or broken document only costs that day's entries.
pub trait DailyEvents: Send {
    fn events_for(&self, date: NaiveDate) -> SourceList;
}

