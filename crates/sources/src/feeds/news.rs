//! Headline scrapers, selected by the endpoint's host.

use super::FeedParser;
use crate::error::FeedError;
use rgb_marquee_types::{Message, SourceKind};

/// Scrape strategy for one provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Google,
    Yahoo,
    AssociatedPress,
}

impl Provider {
    pub fn from_host(host: &str) -> Option<Self> {
        match host {
            "news.google.com" => Some(Provider::Google),
            "www.yahoo.com" => Some(Provider::Yahoo),
            "hosted2.ap.org" => Some(Provider::AssociatedPress),
            _ => None,
        }
    }

    /// Text that opens and closes each headline
    fn markers(self) -> (&'static str, &'static str) {
        match self {
            Provider::Google => ("true\",\"", "\""),
            Provider::Yahoo => ("alt=\"", "\""),
            Provider::AssociatedPress => ("rel=\"bookmark\">", "</a>"),
        }
    }

    pub fn headlines(self, page: &str) -> Vec<String> {
        let (start, end) = self.markers();
        scan(page, start, end)
            .into_iter()
            .map(|h| cleanup_escapes(&h))
            .collect()
    }
}

/// Every non-empty run of text between `start` and the following `end`
fn scan(page: &str, start: &str, end: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut rest = page;
    while let Some(pos) = rest.find(start) {
        rest = &rest[pos + start.len()..];
        let Some(stop) = rest.find(end) else {
            break;
        };
        if stop > 0 {
            found.push(rest[..stop].to_string());
        }
        rest = &rest[stop..];
    }
    found
}

/// Undo the escapes these pages leave in headline text
pub fn cleanup_escapes(headline: &str) -> String {
    headline
        .replace("\\u0026", "&")
        .replace("&#x27;", "'")
        .replace("&#x39;", "9")
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NewsParser;

impl FeedParser for NewsParser {
    fn source(&self) -> SourceKind {
        SourceKind::News
    }

    fn parse(&self, endpoint: &str, raw: &str) -> Result<Vec<Message>, FeedError> {
        let url = reqwest::Url::parse(endpoint).map_err(|e| FeedError::parse(endpoint, e))?;
        let host = url.host_str().unwrap_or_default();
        let provider = Provider::from_host(host)
            .ok_or_else(|| FeedError::parse(endpoint, format!("no headline scraper for {}", host)))?;

        Ok(provider
            .headlines(raw)
            .into_iter()
            .map(Message::bright)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_headlines() {
        let page = r#"[null,"true","Markets rally \u0026 close higher"],["true","Storm&#x27;s path shifts"]"#;
        let messages = NewsParser.parse("https://news.google.com/?hl=en", page).unwrap();
        let texts: Vec<&str> = messages.iter().map(Message::text).collect();
        assert_eq!(texts, vec!["Markets rally & close higher", "Storm's path shifts"]);
    }

    #[test]
    fn test_yahoo_headlines_skip_empty() {
        let page = r#"<img alt="" src="a"><img alt="Team wins 3&#x39; title" src="b">"#;
        assert_eq!(
            Provider::Yahoo.headlines(page),
            vec!["Team wins 39 title".to_string()]
        );
    }

    #[test]
    fn test_ap_headlines() {
        let page = r#"<a href="/1" rel="bookmark">First story</a> <a href="/2" rel="bookmark">Second story</a>"#;
        let messages = NewsParser.parse("http://hosted2.ap.org/APDEFAULT", page).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].text(), "Second story");
    }

    #[test]
    fn test_unterminated_headline_dropped() {
        assert!(Provider::Yahoo.headlines(r#"alt="no closing quote"#).is_empty());
    }

    #[test]
    fn test_unknown_host_is_parse_error() {
        let err = NewsParser
            .parse("https://example.com/news", "anything")
            .unwrap_err();
        assert!(matches!(err, FeedError::Parse { .. }));
    }
}
