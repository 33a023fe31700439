//! What the weather screen shows for each lookup state.

use crate::city::CityQuery;
use crate::lookup::WeatherResult;
use crate::types::WeatherCondition;

/// Title shown instead of the city when the lookup failed.
pub const NOT_FOUND_TITLE: &str = "Not Found";

/// Illustration for the weather screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherImage {
    Clear,
    Cloud,
    Mist,
    Rain,
    Snow,
    NotFound,
}

impl WeatherImage {
    pub fn for_condition(condition: WeatherCondition) -> Self {
        match condition {
            WeatherCondition::Clear => Self::Clear,
            WeatherCondition::Clouds => Self::Cloud,
            WeatherCondition::Mist => Self::Mist,
            WeatherCondition::Rain => Self::Rain,
            WeatherCondition::Snow => Self::Snow,
            WeatherCondition::Unrecognized => Self::NotFound,
        }
    }

    /// Bundled image file
    pub fn asset_name(&self) -> &'static str {
        match self {
            Self::Clear => "clear.png",
            Self::Cloud => "cloud.png",
            Self::Mist => "mist.png",
            Self::Rain => "rain.png",
            Self::Snow => "snow.png",
            Self::NotFound => "404.png",
        }
    }
}

/// Temperature and condition text block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherDetails {
    /// e.g. `16°C`
    pub temperature: String,
    /// Lowercase condition keyword
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherDisplay {
    pub title: String,
    pub image: Option<WeatherImage>,
    pub details: Option<WeatherDetails>,
}

impl WeatherDisplay {
    pub fn for_result(city: &CityQuery, result: &WeatherResult) -> Self {
        match result {
            WeatherResult::Pending => Self {
                title: city.label(),
                image: None,
                details: None,
            },
            WeatherResult::NotFound | WeatherResult::NetworkError => Self {
                title: NOT_FOUND_TITLE.to_string(),
                image: Some(WeatherImage::NotFound),
                details: None,
            },
            WeatherResult::Success {
                temperature_celsius,
                condition,
            } => {
                let kind = WeatherCondition::from_keyword(condition);
                // Unknown conditions get the generic image and no text block.
                let details = kind.is_recognized().then(|| WeatherDetails {
                    temperature: format!("{}°C", temperature_celsius),
                    condition: condition.clone(),
                });
                Self {
                    title: city.label(),
                    image: Some(WeatherImage::for_condition(kind)),
                    details,
                }
            }
        }
    }
}
