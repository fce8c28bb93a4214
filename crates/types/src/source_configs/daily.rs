//! Daily events (holidays and birthdays) configuration types.
//!
//! Holidays such as "third Monday of January" are matched with a fixed
//! day-of-month window per rule rather than a calendar computation. The
//! table is configurable so a window can be adjusted without code changes.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

/// Named floating-date rules found in the `day` field of an event entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FloatingRule {
    First,
    Second,
    Third,
    Fourth,
    Last,
    Easter,
    PalmSunday,
    GoodFriday,
}

impl FromStr for FloatingRule {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "First" => Ok(FloatingRule::First),
            "Second" => Ok(FloatingRule::Second),
            "Third" => Ok(FloatingRule::Third),
            "Fourth" => Ok(FloatingRule::Fourth),
            "Last" => Ok(FloatingRule::Last),
            "Easter" => Ok(FloatingRule::Easter),
            "PalmSunday" => Ok(FloatingRule::PalmSunday),
            "GoodFriday" => Ok(FloatingRule::GoodFriday),
            _ => Err(()),
        }
    }
}

/// Inclusive day-of-month range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    pub first: u32,
    pub last: u32,
}

impl DayWindow {
    pub const fn new(first: u32, last: u32) -> Self {
        Self { first, last }
    }

    pub fn contains(&self, day: u32) -> bool {
        (self.first..=self.last).contains(&day)
    }
}

/// Day-of-month window for every floating rule.
///
/// Deserialising merges the given rules over the default table, so a config
/// only needs the windows it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HolidayWindows(BTreeMap<FloatingRule, DayWindow>);

impl HolidayWindows {
    /// Whether `day` falls in the window for `rule`; unknown rules never match
    pub fn contains(&self, rule: FloatingRule, day: u32) -> bool {
        self.0.get(&rule).is_some_and(|w| w.contains(day))
    }

    pub fn set(&mut self, rule: FloatingRule, window: DayWindow) {
        self.0.insert(rule, window);
    }
}

impl<'de> Deserialize<'de> for HolidayWindows {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let overrides = BTreeMap::<FloatingRule, DayWindow>::deserialize(deserializer)?;
        let mut windows = HolidayWindows::default();
        for (rule, window) in overrides {
            windows.set(rule, window);
        }
        Ok(windows)
    }
}

impl Default for HolidayWindows {
    fn default() -> Self {
        Self(BTreeMap::from([
            (FloatingRule::First, DayWindow::new(1, 7)),
            (FloatingRule::Second, DayWindow::new(8, 14)),
            (FloatingRule::Third, DayWindow::new(15, 21)),
            (FloatingRule::Fourth, DayWindow::new(22, 28)),
            // Only May needs this, which has 31 days
            (FloatingRule::Last, DayWindow::new(25, 31)),
            // First Sunday after the 21st
            (FloatingRule::Easter, DayWindow::new(21, 27)),
            (FloatingRule::PalmSunday, DayWindow::new(14, 20)),
            (FloatingRule::GoodFriday, DayWindow::new(19, 25)),
        ]))
    }
}

fn default_holidays_path() -> PathBuf {
    PathBuf::from("holidays.xml")
}

fn default_birthdays_path() -> PathBuf {
    PathBuf::from("birthdays.xml")
}

/// Daily events source configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailySourceConfig {
    #[serde(default = "default_holidays_path")]
    pub holidays_path: PathBuf,
    #[serde(default = "default_birthdays_path")]
    pub birthdays_path: PathBuf,
    #[serde(default)]
    pub windows: HolidayWindows,
}

impl DailySourceConfig {
    /// Documents in load order
    pub fn documents(&self) -> [&PathBuf; 2] {
        [&self.holidays_path, &self.birthdays_path]
    }
}

impl Default for DailySourceConfig {
    fn default() -> Self {
        Self {
            holidays_path: default_holidays_path(),
            birthdays_path: default_birthdays_path(),
            windows: HolidayWindows::default(),
        }
    }
}
