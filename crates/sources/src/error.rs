//! Error types for the source workers.
//!
//! None of these ever reach the render loop. A worker logs them and either
//! keeps its stale content or, for [`SensorError::Absent`], stops.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the BME280 reader
#[derive(Debug, Error)]
pub enum SensorError {
    /// Chip identity could not be read; the reader stops for good
    #[error("No BME280 answering at 0x{address:02X}: {reason}")]
    Absent { address: u8, reason: String },

    /// A transfer failed; the current sample is skipped
    #[error("I2C transfer failed: {0}")]
    Bus(String),
}

/// Errors from a feed fetch/parse cycle
#[derive(Debug, Error)]
pub enum FeedError {
    /// Endpoint unreachable, timed out or returned a non-2xx status
    #[error("Transport error for {endpoint}: {reason}")]
    Transport { endpoint: String, reason: String },

    /// Payload did not have the expected shape
    #[error("Parse error for {endpoint}: {reason}")]
    Parse { endpoint: String, reason: String },
}

impl FeedError {
    pub fn transport(endpoint: &str, reason: impl ToString) -> Self {
        FeedError::Transport {
            endpoint: redact_endpoint(endpoint),
            reason: reason.to_string(),
        }
    }

    pub fn parse(endpoint: &str, reason: impl ToString) -> Self {
        FeedError::Parse {
            endpoint: redact_endpoint(endpoint),
            reason: reason.to_string(),
        }
    }
}

/// Endpoint with its query string masked. Query strings carry API keys.
pub fn redact_endpoint(endpoint: &str) -> String {
    match endpoint.split_once('?') {
        Some((base, _)) => format!("{}?<redacted>", base),
        None => endpoint.to_string(),
    }
}

/// Errors loading one daily-events document
#[derive(Debug, Error)]
pub enum DailyError {
    #[error("Failed to read {path}: {source}")]
    Missing {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_endpoint() {
        assert_eq!(
            redact_endpoint("http://api.openweathermap.org/data/2.5/weather?zip=80301&APPID=secret"),
            "http://api.openweathermap.org/data/2.5/weather?<redacted>"
        );
        assert_eq!(redact_endpoint("https://news.google.com/"), "https://news.google.com/");
    }

    #[test]
    fn test_feed_errors_never_show_query() {
        let url = "http://api.openweathermap.org/data/2.5/weather?zip=80301&APPID=secret";
        let transport = FeedError::transport(url, "HTTP 401 Unauthorized").to_string();
        let parse = FeedError::parse(url, "missing field `main`").to_string();
        for message in [transport, parse] {
            assert!(!message.contains("secret"), "{}", message);
            assert!(message.contains("api.openweathermap.org"), "{}", message);
        }
    }
}
