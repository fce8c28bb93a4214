//! Quote-of-the-day scraper.
//!
//! The provider serves a script of `br.writeln("...")` calls. The quote is
//! the line ending in `<br>");` and the author is the text of the first link.

use super::FeedParser;
use crate::error::FeedError;
use rgb_marquee_types::{Message, Rgb, SourceKind};

const LINE_PREFIX: &str = "br.writeln";
/// `br.writeln("` is 12 characters
const PAYLOAD_OFFSET: usize = 12;
const QUOTE_END: &str = "<br>\");";

pub const FALLBACK_QUOTE: &str = "Progress is impossible without change, and those who cannot change their minds cannot change anything";
pub const FALLBACK_AUTHOR: &str = "George Bernard Shaw";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

impl Quote {
    fn into_messages(self) -> Vec<Message> {
        let color = Rgb::random_bright();
        let mut messages = vec![Message::new(color, self.text)];
        if !self.author.is_empty() {
            messages.push(Message::new(color, self.author));
        }
        messages
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct QuoteParser;

impl QuoteParser {
    pub fn extract(raw: &str) -> Option<Quote> {
        let mut text = None;
        let mut author = None;

        for line in raw.lines().filter(|l| l.starts_with(LINE_PREFIX)) {
            let Some(payload) = line.get(PAYLOAD_OFFSET..) else {
                continue;
            };
            if payload.starts_with("<b") {
                continue;
            }

            if text.is_none() && payload.ends_with(QUOTE_END) {
                if let Some(end) = payload.find("<br>") {
                    text = Some(payload[..end].to_string());
                }
            }

            if author.is_none() {
                if let Some(end) = payload.find("</a>").filter(|&end| end > 0) {
                    let start = payload.find('>').map_or(0, |p| p + 1);
                    if start <= end {
                        author = Some(payload[start..end].to_string());
                    }
                }
            }
        }

        let text = text.filter(|t| !t.is_empty())?;
        Some(Quote {
            text,
            author: author.unwrap_or_default(),
        })
    }
}

impl FeedParser for QuoteParser {
    fn source(&self) -> SourceKind {
        SourceKind::Quote
    }

    fn parse(&self, endpoint: &str, raw: &str) -> Result<Vec<Message>, FeedError> {
        Self::extract(raw)
            .map(Quote::into_messages)
            .ok_or_else(|| FeedError::parse(endpoint, "no quote found"))
    }

    fn fallback(&self) -> Option<Vec<Message>> {
        Some(
            Quote {
                text: FALLBACK_QUOTE.to_string(),
                author: FALLBACK_AUTHOR.to_string(),
            }
            .into_messages(),
        )
    }
}
