//! Aggregator - builds the two displayed message sequences
//!
//! The top line is rebuilt from the clock on every request. The bottom line
//! is the priority-ordered concatenation of every source list and is only
//! rebuilt when the content store is dirty.

use crate::constants::NEWS_WEATHER_REPEAT_THRESHOLD;
use crate::content_store::{ContentStore, Snapshot};
use crate::daily::DailyEvents;
use chrono::{Datelike, Local, NaiveDateTime, Timelike, Weekday};
use log::{debug, info};
use rgb_marquee_types::{Message, SourceKind, TimeFormat};
use std::sync::Arc;

/// Format the time of day for the top line
pub fn format_time(now: &NaiveDateTime, format: TimeFormat) -> String {
    match format {
        TimeFormat::Hour24 => format!("{:02}:{:02}", now.hour(), now.minute()),
        TimeFormat::Hour12 => {
            let hour = match now.hour() {
                0 => 12,
                h if h > 12 => h - 12,
                h => h,
            };
            format!("{:2}:{:02}:{:02}", hour, now.minute(), now.second())
        }
    }
}

/// Format the date for the top line, e.g. "Friday, Oct 16 2026"
pub fn format_date(now: &NaiveDateTime) -> String {
    now.format("%A, %b %d %Y").to_string()
}

/// Concatenate source lists in priority order.
///
/// When the news feed is enabled and busy the weather list is appended a
/// second time so it still comes round often.
pub fn merge_by_priority(lists: &Snapshot, news_enabled: bool) -> Vec<Message> {
    let list = move |kind: SourceKind| lists.get(&kind).map(Vec::as_slice).unwrap_or_default();

    let mut merged: Vec<Message> = SourceKind::PRIORITY
        .iter()
        .flat_map(|&kind| list(kind).iter().cloned())
        .collect();

    if news_enabled && list(SourceKind::News).len() > NEWS_WEATHER_REPEAT_THRESHOLD {
        merged.extend(list(SourceKind::Weather).iter().cloned());
    }

    merged
}

/// Builds the top and bottom sequences from the content store
pub struct Aggregator {
    store: Arc<ContentStore>,
    time_format: TimeFormat,
    news_enabled: bool,
    daily: Option<Box<dyn DailyEvents>>,
    /// Weekday seen by the previous top rebuild
    last_weekday: Option<Weekday>,
    /// Most recently built bottom sequence
    bottom: Arc<[Message]>,
}

impl Aggregator {
    pub fn new(store: Arc<ContentStore>, time_format: TimeFormat, news_enabled: bool) -> Self {
        Self {
            store,
            time_format,
            news_enabled,
            daily: None,
            last_weekday: None,
            bottom: Arc::from(Vec::new()),
        }
    }

    /// Attach the daily events loader consulted on every weekday change
    pub fn with_daily_events(mut self, daily: Box<dyn DailyEvents>) -> Self {
        self.daily = Some(daily);
        self
    }

    /// `[time, date]` for the current local time
    pub fn rebuild_top(&mut self) -> Vec<Message> {
        self.rebuild_top_at(Local::now().naive_local())
    }

    /// `[time, date]` for `now`.
    ///
    /// On the first call and whenever the weekday differs from the previous
    /// call the daily events list is reloaded for the new date first.
    pub fn rebuild_top_at(&mut self, now: NaiveDateTime) -> Vec<Message> {
        let weekday = now.weekday();
        if self.last_weekday != Some(weekday) {
            info!(
                "New day: {} (previously {:?})",
                weekday,
                self.last_weekday
            );
            self.reload_daily(now);
            self.last_weekday = Some(weekday);
        }

        vec![
            Message::bright(format_time(&now, self.time_format)),
            Message::bright(format_date(&now)),
        ]
    }

    fn reload_daily(&self, now: NaiveDateTime) {
        let Some(daily) = &self.daily else {
            return;
        };
        // File I/O happens here, outside the store lock
        let events = daily.events_for(now.date());
        debug!("Loaded {} daily events for {}", events.len(), now.date());
        self.store.replace(SourceKind::Daily, events);
    }

    /// Rebuild the bottom sequence if the store changed since the last
    /// rebuild, otherwise hand back the previous sequence untouched.
    pub fn rebuild_bottom(&mut self) -> Arc<[Message]> {
        let news_enabled = self.news_enabled;
        if let Some(merged) = self
            .store
            .merge_if_dirty(|lists| merge_by_priority(lists, news_enabled))
        {
            debug!("Built new bottom line ({} messages)", merged.len());
            self.bottom = Arc::from(merged);
        }
        Arc::clone(&self.bottom)
    }
}
