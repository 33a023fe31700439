//! City name normalization.
//!
//! Free text such as `"new-york"` becomes the query `New%20York` and the label
//! `New-York`. Hyphens separate words; every word gets a leading capital.

use crate::types::WeatherError;

/// Word separator the weather API expects inside the `q` parameter.
pub const SPACE_TOKEN: &str = "%20";

const LABEL_SEPARATOR: &str = "-";

/// A normalized city name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityQuery {
    words: Vec<String>,
}

impl CityQuery {
    /// Query form: words percent-encoded and joined with [`SPACE_TOKEN`].
    pub fn normalized(&self) -> String {
        self.words
            .iter()
            .map(|w| urlencoding::encode(w).into_owned())
            .collect::<Vec<_>>()
            .join(SPACE_TOKEN)
    }

    /// Display form: words joined with hyphens.
    pub fn label(&self) -> String {
        self.words.join(LABEL_SEPARATOR)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl std::fmt::Display for CityQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

/// Normalize free-text city input.
///
/// # Errors
/// Returns `WeatherError::EmptyCity` if the input is empty or only whitespace
/// and hyphens.
pub fn normalize_city(input: &str) -> Result<CityQuery, WeatherError> {
    let words: Vec<String> = input
        .trim()
        .split(LABEL_SEPARATOR)
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(capitalize_first)
        .collect();

    if words.is_empty() {
        return Err(WeatherError::EmptyCity);
    }

    Ok(CityQuery { words })
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(word.len());
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}
