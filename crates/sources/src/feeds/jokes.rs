//! Joke page scraper.
//!
//! The joke is the block of lines between a line reading `<P>` and the next
//! line reading `<CENTER>`. Sentences are split into separate messages.

use super::html::html_to_text;
use super::FeedParser;
use crate::error::FeedError;
use rgb_marquee_types::{Message, Rgb, SourceKind};

const START_MARKER: &str = "<P>";
const END_MARKER: &str = "<CENTER>";

/// Clean one scraped line: text only, ASCII only, no edge dashes or spaces
fn clean_line(line: &str) -> String {
    let text = html_to_text(line);
    let ascii: String = text.trim().chars().filter(char::is_ascii).collect();
    ascii.trim_matches(|c| c == '-' || c == ' ').to_string()
}

#[derive(Debug, Default, Clone, Copy)]
pub struct JokesParser;

impl JokesParser {
    /// Split the joke block into pieces; each piece ends with `?` or `.`
    /// except possibly the last
    pub fn extract(raw: &str) -> Option<Vec<String>> {
        let mut lines = raw.lines().map(str::trim);
        lines.by_ref().find(|&line| line == START_MARKER)?;

        let mut pieces = Vec::new();
        let mut joke = String::new();
        for line in lines.take_while(|&line| line != END_MARKER) {
            let piece = clean_line(line);
            if piece.is_empty() {
                continue;
            }
            if !joke.is_empty() {
                joke.push(' ');
            }
            joke.push_str(&piece);
            if joke.ends_with('?') || joke.ends_with('.') {
                pieces.push(std::mem::take(&mut joke));
            }
        }
        if !joke.is_empty() {
            pieces.push(joke);
        }
        Some(pieces)
    }
}

impl FeedParser for JokesParser {
    fn source(&self) -> SourceKind {
        SourceKind::Jokes
    }

    fn parse(&self, endpoint: &str, raw: &str) -> Result<Vec<Message>, FeedError> {
        let pieces = Self::extract(raw)
            .ok_or_else(|| FeedError::parse(endpoint, "no joke block found"))?;
        // One colour for the whole joke
        let color = Rgb::random_bright();
        Ok(pieces
            .into_iter()
            .map(|text| Message::new(color, text))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "<HTML>\n<TITLE>Jokes</TITLE>\n<P>\n<B>Q:</B> Why did the chicken\ncross the road?\n\n-- A: To get to the <I>other</I> side. --\nCaf\u{e9} &amp; bar\n<CENTER>\nIgnored trailer.\n";

    #[test]
    fn test_extract_splits_on_sentence_end() {
        let pieces = JokesParser::extract(PAGE).unwrap();
        assert_eq!(
            pieces,
            vec![
                "Q: Why did the chicken cross the road?",
                "A: To get to the other side.",
                "Caf & bar",
            ]
        );
    }

    #[test]
    fn test_messages_share_one_color() {
        let messages = JokesParser.parse("http://jokes.example/", PAGE).unwrap();
        assert_eq!(messages.len(), 3);
        assert!(messages.iter().all(|m| m.color() == messages[0].color()));
    }

    #[test]
    fn test_missing_start_marker_is_parse_error() {
        let err = JokesParser
            .parse("http://jokes.example/", "<HTML>no jokes today</HTML>")
            .unwrap_err();
        assert!(matches!(err, FeedError::Parse { .. }));
    }

    #[test]
    fn test_unterminated_block_runs_to_end() {
        let pieces = JokesParser::extract("<P>\nKnock knock\n").unwrap();
        assert_eq!(pieces, vec!["Knock knock"]);
    }
}
