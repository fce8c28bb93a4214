//! Holidays and birthdays from the XML calendars
//!
//! Each document is a flat list of `<item>` entries. An entry applies to a
//! date when its month matches and its day is either the date's day, the
//! every-day sentinel `0`, or a floating rule (e.g. `Third` with flag
//! `Monday`) whose day window contains the date.

use crate::error::DailyError;
use chrono::{Datelike, NaiveDate};
use log::{debug, warn};
use rgb_marquee_core::DailyEvents;
use rgb_marquee_types::{
    DailySourceConfig, FloatingRule, HolidayWindows, Message, Rgb, SourceList,
};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(rename = "item", default)]
    items: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    #[serde(default)]
    month: String,
    #[serde(default)]
    day: String,
    #[serde(default)]
    flags: String,
    #[serde(default)]
    foregnd: String,
    #[serde(default)]
    text: String,
}

/// Day field of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayRule {
    /// Day of month; 0 means every day of the month
    Date(u32),
    Floating(FloatingRule),
}

impl DayRule {
    fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Ok(day) = value.parse::<u32>() {
            return Some(DayRule::Date(day));
        }
        value.parse().ok().map(DayRule::Floating)
    }
}

/// One calendar entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyItem {
    pub month: u32,
    pub day: DayRule,
    /// Weekday name a floating rule must fall on, e.g. "Monday"
    pub weekday_flag: String,
    pub text: String,
    /// Foreground colour, if the entry gives a usable one
    pub color: Option<Rgb>,
}

impl DailyItem {
    pub fn applies_to(&self, date: NaiveDate, windows: &HolidayWindows) -> bool {
        if self.month != date.month() {
            return false;
        }
        match self.day {
            DayRule::Date(0) => true,
            DayRule::Date(day) => day == date.day(),
            DayRule::Floating(rule) => {
                self.weekday_flag == date.format("%A").to_string()
                    && windows.contains(rule, date.day())
            }
        }
    }

    fn into_message(self) -> Message {
        Message::new(self.color.unwrap_or_else(Rgb::random_bright), self.text)
    }
}

/// Parse a calendar document. Entries with an unreadable month or day are
/// skipped.
pub fn parse_items(document: &str) -> Result<Vec<DailyItem>, quick_xml::DeError> {
    let document: Document = quick_xml::de::from_str(document)?;
    Ok(document
        .items
        .into_iter()
        .filter_map(|raw| {
            let month = raw.month.trim().parse().ok();
            let day = DayRule::parse(&raw.day);
            let (Some(month), Some(day)) = (month, day) else {
                debug!("Skipping calendar entry {:?}", raw.text);
                return None;
            };
            Some(DailyItem {
                month,
                day,
                weekday_flag: raw.flags.trim().to_string(),
                text: raw.text.trim().to_string(),
                color: Rgb::parse(&raw.foregnd),
            })
        })
        .collect())
}

/// Read and parse one calendar file
pub fn load_document(path: &Path) -> Result<Vec<DailyItem>, DailyError> {
    let content = std::fs::read_to_string(path).map_err(|source| DailyError::Missing {
        path: path.to_path_buf(),
        source,
    })?;
    parse_items(&content).map_err(|e| DailyError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// [`DailyEvents`] backed by the holiday and birthday files
pub struct DailyEventsLoader {
    config: DailySourceConfig,
}

impl DailyEventsLoader {
    pub fn new(config: DailySourceConfig) -> Self {
        Self { config }
    }
}

impl DailyEvents for DailyEventsLoader {
    fn events_for(&self, date: NaiveDate) -> SourceList {
        let mut events = SourceList::new();
        for path in self.config.documents() {
            match load_document(path) {
                Ok(items) => events.extend(
                    items
                        .into_iter()
                        .filter(|item| item.applies_to(date, &self.config.windows))
                        .map(DailyItem::into_message),
                ),
                Err(e) => warn!("Skipping calendar for {}: {}", date, e),
            }
        }
        events
    }
}
