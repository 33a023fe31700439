use serde::Deserialize;

/// Weather condition keywords the app has artwork for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherCondition {
    Clear,
    Clouds,
    Mist,
    Rain,
    Snow,
    Unrecognized,
}

impl WeatherCondition {
    /// Match a lowercase OpenWeatherMap `main` keyword
    /// See: https://openweathermap.org/weather-conditions
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "clear" => Self::Clear,
            "clouds" => Self::Clouds,
            "mist" => Self::Mist,
            "rain" => Self::Rain,
            "snow" => Self::Snow,
            _ => Self::Unrecognized,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized)
    }
}

/// Current conditions for a city, as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentWeather {
    /// Temperature in °C, rounded half up
    pub temperature_celsius: i64,
    /// Lowercase condition keyword (`rain`, `clouds`, ...); empty if the API sent none
    pub condition: String,
}

impl CurrentWeather {
    pub fn from_response(response: &OpenWeatherResponse) -> Self {
        let condition = response
            .weather
            .first()
            .map(|w| w.main.to_lowercase())
            .unwrap_or_default();

        Self {
            temperature_celsius: round_half_up(response.main.temp),
            condition,
        }
    }

    pub fn condition_kind(&self) -> WeatherCondition {
        WeatherCondition::from_keyword(&self.condition)
    }
}

/// Round to the nearest integer, halves toward positive infinity (15.5 -> 16, -2.5 -> -2).
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// `GET /weather` response body (only the fields we read)
#[derive(Debug, Clone, Deserialize)]
pub struct OpenWeatherResponse {
    #[serde(default)]
    pub weather: Vec<OpenWeatherCondition>,
    pub main: OpenWeatherMain,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenWeatherCondition {
    pub main: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenWeatherMain {
    pub temp: f64,
}

/// Weather lookup errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("City input is empty")]
    EmptyCity,
    #[error("City not found: {0}")]
    NotFound(String),
    #[error("Weather API returned status {0}")]
    Status(u16),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn test_keyword_matching() {
        assert_eq!(WeatherCondition::from_keyword("clear"), WeatherCondition::Clear);
        assert_eq!(WeatherCondition::from_keyword("clouds"), WeatherCondition::Clouds);
        assert_eq!(WeatherCondition::from_keyword("mist"), WeatherCondition::Mist);
        assert_eq!(WeatherCondition::from_keyword("rain"), WeatherCondition::Rain);
        assert_eq!(WeatherCondition::from_keyword("snow"), WeatherCondition::Snow);
    }

    #[test]
    fn test_unknown_keywords_unrecognized() {
        assert_eq!(WeatherCondition::from_keyword("thunderstorm"), WeatherCondition::Unrecognized);
        assert_eq!(WeatherCondition::from_keyword(""), WeatherCondition::Unrecognized);
        // Matching is on the lowercased keyword only
        assert_eq!(WeatherCondition::from_keyword("Rain"), WeatherCondition::Unrecognized);
    }

    #[test]
    fn test_from_response_rounds_and_lowercases() {
        let body: OpenWeatherResponse = serde_json::from_str(
            r#"{ "weather": [{ "main": "Rain" }], "main": { "temp": 15.6 } }"#,
        )
        .unwrap();

        let current = CurrentWeather::from_response(&body);
        assert_eq!(current.temperature_celsius, 16);
        assert_eq!(current.condition, "rain");
        assert_eq!(current.condition_kind(), WeatherCondition::Rain);
    }

    #[test]
    fn test_from_response_without_weather_entry() {
        let body: OpenWeatherResponse =
            serde_json::from_str(r#"{ "main": { "temp": -3.2 } }"#).unwrap();

        let current = CurrentWeather::from_response(&body);
        assert_eq!(current.temperature_celsius, -3);
        assert_eq!(current.condition, "");
        assert!(!current.condition_kind().is_recognized());
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(15.5), 16);
        assert_eq!(round_half_up(15.4), 15);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
        assert_eq!(round_half_up(0.0), 0);
    }
}
