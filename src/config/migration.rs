//! Import of the legacy `options.ini`
//!
//! The old ticker read `key=value` lines from an options file next to the
//! script. Importing maps those keys onto an [`AppConfig`] so an existing
//! installation keeps its feeds.

use super::AppConfig;
use anyhow::{Context, Result};
use log::{debug, warn};
use rgb_marquee_types::TimeFormat;
use std::path::Path;

/// True when the value starts with `t` or `T`
fn truthy(value: &str) -> bool {
    value.starts_with(['t', 'T'])
}

/// Apply the contents of an options file on top of `config`
pub fn apply_options(config: &mut AppConfig, content: &str) {
    for line in content.lines() {
        // Values may contain '=' (URLs), split at the first one only
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();

        match key {
            "military" => {
                config.clock.time_format = if truthy(value) {
                    TimeFormat::Hour24
                } else {
                    TimeFormat::Hour12
                }
            }
            "temperature" => config.sensor.temperature = truthy(value),
            "humidity" => config.sensor.humidity = truthy(value),
            "pressure" => config.sensor.pressure = truthy(value),
            "weather" => config.weather.enabled = truthy(value),
            "weatherkey" => config.weather.api_key = value.to_string(),
            "weatherzip" => config.weather.zip = value.to_string(),
            "quote" => config.quote.enabled = truthy(value),
            "quoteurl" => config.quote.url = value.to_string(),
            "jokes" => config.jokes.enabled = truthy(value),
            "jokesurl" => config.jokes.urls.push(value.to_string()),
            "jokedelay" => match value.parse() {
                Ok(secs) => config.jokes.update_interval_secs = secs,
                Err(_) => warn!("Ignoring invalid jokedelay '{}'", value),
            },
            "news" => config.news.enabled = truthy(value),
            "newsurl" => config.news.urls.push(value.to_string()),
            other => debug!("Ignoring unknown option '{}'", other),
        }
    }
}

/// Build a configuration from a legacy `options.ini`, starting from defaults
pub fn import_options_ini<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read options file {}", path.display()))?;

    let mut config = AppConfig::default();
    apply_options(&mut config, &content);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPTIONS: &str = "military=True\r
temperature=true
humidity=False
pressure=t
weather=true
weatherkey=abc123
weatherzip=80301
quote=yes
quoteurl=http://quotes.example/qod.js
jokes=TRUE
jokesurl=http://jokes.example/?cat=1
jokesurl=http://jokes.example/?cat=2
jokedelay=0
news=true
newsurl=https://news.google.com/?hl=en-US&gl=US
no equals sign here
";

    #[test]
    fn test_apply_options() {
        let mut config = AppConfig::default();
        apply_options(&mut config, OPTIONS);

        assert_eq!(config.clock.time_format, TimeFormat::Hour24);
        assert!(config.sensor.temperature);
        assert!(!config.sensor.humidity);
        assert!(config.sensor.pressure);
        assert!(config.weather.is_runnable());
        assert_eq!(config.weather.api_key, "abc123");
        assert!(!config.quote.enabled);
        assert_eq!(config.quote.url, "http://quotes.example/qod.js");
        assert_eq!(
            config.jokes.urls,
            vec!["http://jokes.example/?cat=1", "http://jokes.example/?cat=2"]
        );
        assert_eq!(config.jokes.effective_interval_secs(), 1200);
        assert_eq!(config.news.urls, vec!["https://news.google.com/?hl=en-US&gl=US"]);
    }

    #[test]
    fn test_import_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(import_options_ini(dir.path().join("options.ini")).is_err());
    }

    #[test]
    fn test_import_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.ini");
        std::fs::write(&path, "news=true\nnewsurl=http://hosted2.ap.org/APDEFAULT\n").unwrap();

        let config = import_options_ini(&path).unwrap();
        assert!(config.news.is_runnable());
        assert!(!config.weather.enabled);
    }
}
