//! OpenWeatherMap current-weather client.

use multyapp_core::WeatherConfig;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::city::CityQuery;
use crate::types::{CurrentWeather, OpenWeatherResponse, WeatherError};

pub const OPENWEATHER_API_BASE: &str = "https://api.openweathermap.org/data/2.5";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
}

impl WeatherProvider {
    pub fn new(api_key: &str) -> Result<Self, WeatherError> {
        Self::build(api_key, OPENWEATHER_API_BASE, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    /// Build a provider from the `[weather]` config section.
    pub fn from_config(config: &WeatherConfig) -> Result<Self, WeatherError> {
        Self::build(
            &config.api_key,
            &config.base_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Point the provider at another server (tests, proxies).
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self, WeatherError> {
        Self::build(api_key, base_url, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    fn build(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client: Arc::new(client),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch current conditions for a city in metric units.
    #[instrument(skip(self, city), fields(city = %city), level = "info")]
    pub async fn fetch_current(&self, city: &CityQuery) -> Result<CurrentWeather, WeatherError> {
        // `normalized()` is already percent-encoded, so the URL is assembled by hand.
        let url = format!(
            "{}/weather?q={}&appid={}&units=metric",
            self.base_url,
            city.normalized(),
            urlencoding::encode(&self.api_key),
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            tracing::info!("Weather API has no city {}", city);
            return Err(WeatherError::NotFound(city.label()));
        }
        if !status.is_success() {
            tracing::warn!("Weather API returned status {}", status);
            return Err(WeatherError::Status(status.as_u16()));
        }

        let body: OpenWeatherResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        let current = CurrentWeather::from_response(&body);
        tracing::debug!(
            "Weather for {}: {}°C {}",
            city,
            current.temperature_celsius,
            current.condition
        );
        Ok(current)
    }
}

impl std::fmt::Debug for WeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
