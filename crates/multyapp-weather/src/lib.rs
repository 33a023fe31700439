//! Weather lookup for MultyApp
//!
//! Normalizes free-text city input, fetches current conditions from the
//! OpenWeatherMap API and maps the outcome to what the weather screen shows.

pub mod city;
pub mod display;
mod error_mapping;
pub mod lookup;
pub mod provider;
pub mod types;

pub use city::{normalize_city, CityQuery, SPACE_TOKEN};
pub use display::{WeatherDetails, WeatherDisplay, WeatherImage, NOT_FOUND_TITLE};
pub use lookup::{fetch_weather, WeatherLookup, WeatherResult};
pub use provider::{WeatherProvider, OPENWEATHER_API_BASE};
pub use types::*;
