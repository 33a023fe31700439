//! Maps lookup errors to multyapp_core::AppError for user-facing messages.

use multyapp_core::{AppError, WeatherError};

use crate::types::WeatherError as LookupError;

impl From<LookupError> for AppError {
    fn from(e: LookupError) -> Self {
        match e {
            LookupError::EmptyCity => AppError::Weather(WeatherError::MissingCity),
            LookupError::NotFound(city) => AppError::Weather(WeatherError::CityNotFound(city)),
            LookupError::Status(401) => AppError::Weather(WeatherError::InvalidApiKey),
            LookupError::Status(status) if status >= 500 => {
                AppError::Weather(WeatherError::ServiceUnavailable)
            }
            LookupError::Status(status) => {
                AppError::Weather(WeatherError::ApiError(format!("status {}", status)))
            }
            LookupError::Network(e) => AppError::Weather(WeatherError::ApiError(e.to_string())),
            LookupError::Parse(s) => AppError::Weather(WeatherError::ApiError(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_city_prompts_user() {
        let app_err = AppError::from(LookupError::EmptyCity);
        assert_eq!(app_err.user_message(), "Please enter a city");
    }

    #[test]
    fn status_codes_map_to_distinct_errors() {
        assert!(matches!(
            AppError::from(LookupError::Status(401)),
            AppError::Weather(WeatherError::InvalidApiKey)
        ));
        assert!(matches!(
            AppError::from(LookupError::Status(503)),
            AppError::Weather(WeatherError::ServiceUnavailable)
        ));
        assert!(matches!(
            AppError::from(LookupError::Status(429)),
            AppError::Weather(WeatherError::ApiError(_))
        ));
    }
}
