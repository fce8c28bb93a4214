//! Messages and the named sources that produce them.

use crate::color::Rgb;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A coloured piece of text scrolled across one display line.
///
/// Immutable once built; sources replace whole lists instead of editing
/// messages in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    color: Rgb,
    text: String,
}

impl Message {
    pub fn new(color: Rgb, text: impl Into<String>) -> Self {
        Self {
            color,
            text: text.into(),
        }
    }

    /// Message with a random bright colour
    pub fn bright(text: impl Into<String>) -> Self {
        Self::new(Rgb::random_bright(), text)
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// The ordered list of messages currently owned by one source
pub type SourceList = Vec<Message>;

/// Every content source feeding the bottom line.
///
/// Declaration order is the bottom-line priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Daily,
    Quote,
    Sensor,
    Jokes,
    Weather,
    News,
}

impl SourceKind {
    /// All sources in bottom-line priority order
    pub const PRIORITY: [SourceKind; 6] = [
        SourceKind::Daily,
        SourceKind::Quote,
        SourceKind::Sensor,
        SourceKind::Jokes,
        SourceKind::Weather,
        SourceKind::News,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SourceKind::Daily => "daily",
            SourceKind::Quote => "quote",
            SourceKind::Sensor => "sensor",
            SourceKind::Jokes => "jokes",
            SourceKind::Weather => "weather",
            SourceKind::News => "news",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_matches_declaration_order() {
        let mut sorted = SourceKind::PRIORITY;
        sorted.sort();
        assert_eq!(sorted, SourceKind::PRIORITY);
        assert_eq!(SourceKind::PRIORITY[0].name(), "daily");
        assert_eq!(SourceKind::PRIORITY[5].name(), "news");
    }

    #[test]
    fn test_source_kind_serialization() {
        let json = serde_json::to_string(&SourceKind::Weather).unwrap();
        assert_eq!(json, "\"weather\"");
        let back: SourceKind = serde_json::from_str("\"jokes\"").unwrap();
        assert_eq!(back, SourceKind::Jokes);
    }
}
