//! Weather data models

use serde::{Deserialize, Serialize};

/// Ambient conditions for one prediction.
///
/// Either reading may be unavailable; an unavailable reading contributes nothing
/// to any adjustment rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSample {
    /// Air temperature in °C
    pub temperature: Option<f64>,
    /// Relative humidity, 0-100 %
    pub humidity: Option<f64>,
    /// Location name as resolved by the weather provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl WeatherSample {
    pub fn new(temperature: Option<f64>, humidity: Option<f64>) -> Self {
        Self {
            temperature: temperature.filter(|t| t.is_finite()),
            humidity: humidity.filter(|h| h.is_finite()),
            location: None,
        }
    }

    /// Both readings unavailable
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Apply caller-supplied readings on top of fetched ones
    pub fn overridden_by(self, temperature: Option<f64>, humidity: Option<f64>) -> Self {
        Self {
            temperature: temperature.filter(|t| t.is_finite()).or(self.temperature),
            humidity: humidity.filter(|h| h.is_finite()).or(self.humidity),
            location: self.location,
        }
    }

    pub fn temperature_above(&self, threshold: f64) -> bool {
        self.temperature.map(|t| t > threshold).unwrap_or(false)
    }

    pub fn temperature_below(&self, threshold: f64) -> bool {
        self.temperature.map(|t| t < threshold).unwrap_or(false)
    }

    pub fn humidity_at_least(&self, threshold: f64) -> bool {
        self.humidity.map(|h| h >= threshold).unwrap_or(false)
    }

    pub fn humidity_below(&self, threshold: f64) -> bool {
        self.humidity.map(|h| h < threshold).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_readings_never_match() {
        let sample = WeatherSample::unavailable();
        assert!(!sample.temperature_above(-100.0));
        assert!(!sample.temperature_below(100.0));
        assert!(!sample.humidity_at_least(0.0));
        assert!(!sample.humidity_below(100.0));
    }

    #[test]
    fn test_non_finite_readings_are_unavailable() {
        let sample = WeatherSample::new(Some(f64::NAN), Some(55.0));
        assert_eq!(sample.temperature, None);
        assert_eq!(sample.humidity, Some(55.0));
    }

    #[test]
    fn test_override_precedence() {
        let fetched = WeatherSample::new(Some(31.0), Some(60.0)).with_location("Delhi");
        let merged = fetched.overridden_by(None, Some(88.0));
        assert_eq!(merged.temperature, Some(31.0));
        assert_eq!(merged.humidity, Some(88.0));
        assert_eq!(merged.location.as_deref(), Some("Delhi"));
    }
}
