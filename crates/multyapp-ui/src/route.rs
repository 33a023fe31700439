//! Navigation between the two screens.

use multyapp_weather::CityQuery;

/// Screen to show. The weather screen takes the normalized city as its only
/// parameter; nothing is passed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    TodoList,
    Weather { city: CityQuery },
}

impl Route {
    /// Screen name used by the navigator.
    pub fn title(&self) -> &'static str {
        match self {
            Route::TodoList => "To-Do List",
            Route::Weather { .. } => "Weather",
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use multyapp_weather::normalize_city;

    #[test]
    fn test_route_titles() {
        assert_eq!(Route::TodoList.title(), "To-Do List");
        let city = normalize_city("oslo").unwrap();
        assert_eq!(Route::Weather { city }.title(), "Weather");
    }
}
