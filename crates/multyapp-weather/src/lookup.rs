//! One weather lookup per screen visit.
//!
//! A lookup starts `Pending` and resolves exactly once. Cancelling it (the
//! screen went away) aborts the request and discards any later result.

use multyapp_core::AppError;
use tokio_util::sync::CancellationToken;

use crate::city::CityQuery;
use crate::display::WeatherDisplay;
use crate::provider::WeatherProvider;
use crate::types::{CurrentWeather, WeatherError};

/// Outcome of a lookup as seen by the weather screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherResult {
    Pending,
    Success {
        temperature_celsius: i64,
        condition: String,
    },
    NotFound,
    NetworkError,
}

impl WeatherResult {
    /// Classify a finished fetch.
    pub fn from_outcome(outcome: Result<CurrentWeather, WeatherError>) -> Self {
        match outcome {
            Ok(current) => Self::Success {
                temperature_celsius: current.temperature_celsius,
                condition: current.condition,
            },
            Err(e) => Self::from_error(&e),
        }
    }

    pub fn from_error(error: &WeatherError) -> Self {
        match error {
            WeatherError::NotFound(_) | WeatherError::Status(_) | WeatherError::EmptyCity => {
                Self::NotFound
            }
            WeatherError::Network(_) | WeatherError::Parse(_) => Self::NetworkError,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Not found and network errors are shown the same way.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::NotFound | Self::NetworkError)
    }
}

/// Weather lookup state machine for one city.
#[derive(Debug)]
pub struct WeatherLookup {
    city: CityQuery,
    state: WeatherResult,
    cancel: CancellationToken,
}

impl WeatherLookup {
    pub fn new(city: CityQuery) -> Self {
        Self::with_cancel_token(city, CancellationToken::new())
    }

    /// Use a token owned by the caller, e.g. a child of a screen-wide token.
    pub fn with_cancel_token(city: CityQuery, cancel: CancellationToken) -> Self {
        Self {
            city,
            state: WeatherResult::Pending,
            cancel,
        }
    }

    pub fn city(&self) -> &CityQuery {
        &self.city
    }

    pub fn state(&self) -> &WeatherResult {
        &self.state
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Abort the in-flight request. The lookup stays `Pending` forever.
    pub fn cancel(&self) {
        if !self.cancel.is_cancelled() {
            tracing::debug!("Weather lookup for {} cancelled", self.city);
            self.cancel.cancel();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Run the request and record the result.
    ///
    /// Does nothing if the lookup already resolved or was cancelled.
    pub async fn run(&mut self, provider: &WeatherProvider) -> &WeatherResult {
        if self.state.is_pending() {
            let result = fetch_weather(provider, &self.city, &self.cancel).await;
            if let Some(result) = result {
                self.complete(result);
            }
        }
        &self.state
    }

    /// Record a result produced elsewhere (e.g. a spawned task).
    ///
    /// Returns false, leaving the state untouched, if the lookup was already
    /// resolved or cancelled or `result` is `Pending`.
    pub fn complete(&mut self, result: WeatherResult) -> bool {
        if self.cancel.is_cancelled() || !self.state.is_pending() || result.is_pending() {
            tracing::debug!("Discarding weather result for {}", self.city);
            return false;
        }
        self.state = result;
        true
    }

    pub fn display(&self) -> WeatherDisplay {
        WeatherDisplay::for_result(&self.city, &self.state)
    }
}

/// Fetch and classify, racing the request against `cancel`.
///
/// Returns `None` if cancelled before the request finished.
pub async fn fetch_weather(
    provider: &WeatherProvider,
    city: &CityQuery,
    cancel: &CancellationToken,
) -> Option<WeatherResult> {
    if cancel.is_cancelled() {
        return None;
    }

    tokio::select! {
        _ = cancel.cancelled() => None,
        outcome = provider.fetch_current(city) => match outcome {
            Ok(current) => Some(WeatherResult::from_outcome(Ok(current))),
            Err(e) => {
                let result = WeatherResult::from_error(&e);
                let app_err = AppError::from(e);
                tracing::warn!(
                    "Error fetching weather data: {} ({})",
                    app_err,
                    app_err.user_message()
                );
                Some(result)
            }
        }
    }
}
