//! OpenWeatherMap current-conditions decoder.

use super::FeedParser;
use crate::error::FeedError;
use rgb_marquee_types::{Message, SourceKind, TemperatureUnit};
use serde::Deserialize;

const KELVIN_OFFSET: f64 = 273.15;
const MPS_TO_MPH: f64 = 2.236936;

const COMPASS: [&str; 8] = [
    "North",
    "Northeast",
    "East",
    "Southeast",
    "South",
    "Southwest",
    "West",
    "Northwest",
];

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    weather: Vec<Condition>,
    main: Main,
    wind: Wind,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct Main {
    /// Kelvin
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct Wind {
    /// m/s
    speed: f64,
    #[serde(default)]
    deg: f64,
    gust: Option<f64>,
}

/// Eight-point compass name for a bearing in degrees
pub fn compass_point(degrees: f64) -> &'static str {
    let sector = ((degrees.rem_euclid(360.0) + 22.5) / 45.0).floor() as usize;
    COMPASS[sector % COMPASS.len()]
}

#[derive(Debug, Default, Clone, Copy)]
pub struct WeatherParser {
    pub unit: TemperatureUnit,
}

impl WeatherParser {
    pub fn new(unit: TemperatureUnit) -> Self {
        Self { unit }
    }

    pub fn format(&self, raw: &str) -> Result<String, String> {
        let current: CurrentWeather = serde_json::from_str(raw).map_err(|e| e.to_string())?;
        let condition = current
            .weather
            .first()
            .ok_or_else(|| "no weather conditions".to_string())?;

        let temperature = self.unit.from_celsius(current.main.temp - KELVIN_OFFSET);
        let mut text = format!(
            "Weather: {}, {:.1}{} with {:.0}% RH, Wind from the {} at {:.1}mph",
            condition.description,
            temperature,
            self.unit.suffix(),
            current.main.humidity,
            compass_point(current.wind.deg),
            current.wind.speed * MPS_TO_MPH,
        );
        if let Some(gust) = current.wind.gust.filter(|&g| g > 0.0) {
            text.push_str(&format!(", gusting to {:.1}mph", gust * MPS_TO_MPH));
        }
        Ok(text)
    }
}

impl FeedParser for WeatherParser {
    fn source(&self) -> SourceKind {
        SourceKind::Weather
    }

    fn parse(&self, endpoint: &str, raw: &str) -> Result<Vec<Message>, FeedError> {
        let text = self
            .format(raw)
            .map_err(|reason| FeedError::parse(endpoint, reason))?;
        Ok(vec![Message::bright(text)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "coord": {"lon": -105.27, "lat": 40.01},
        "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
        "main": {"temp": 295.15, "feels_like": 294.9, "pressure": 1013, "humidity": 41},
        "wind": {"speed": 4.47, "deg": 200, "gust": 8.94},
        "name": "Boulder"
    }"#;

    #[test]
    fn test_format_fahrenheit_with_gust() {
        let text = WeatherParser::new(TemperatureUnit::Fahrenheit)
            .format(RESPONSE)
            .unwrap();
        assert_eq!(
            text,
            "Weather: light rain, 71.6F with 41% RH, Wind from the South at 10.0mph, gusting to 20.0mph"
        );
    }

    #[test]
    fn test_format_celsius_without_gust() {
        let raw = RESPONSE.replace(r#", "gust": 8.94"#, "");
        let text = WeatherParser::new(TemperatureUnit::Celsius).format(&raw).unwrap();
        assert!(text.starts_with("Weather: light rain, 22.0C with 41% RH"));
        assert!(text.ends_with("at 10.0mph"));
    }

    #[test]
    fn test_compass_sectors() {
        assert_eq!(compass_point(0.0), "North");
        assert_eq!(compass_point(22.4), "North");
        assert_eq!(compass_point(22.5), "Northeast");
        assert_eq!(compass_point(180.0), "South");
        assert_eq!(compass_point(337.5), "North");
        assert_eq!(compass_point(359.0), "North");
        assert_eq!(compass_point(300.0), "Northwest");
    }

    #[test]
    fn test_unexpected_payload_is_parse_error() {
        let err = WeatherParser::default()
            .parse("http://api.example/", r#"{"cod": 401, "message": "Invalid API key"}"#)
            .unwrap_err();
        assert!(matches!(err, FeedError::Parse { .. }));
    }
}
