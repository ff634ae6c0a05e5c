//! Storage advisor: one line of advice from the current temperature

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::external::WeatherClient;

const HOT_ABOVE_CELSIUS: f64 = 30.0;
const COLD_BELOW_CELSIUS: f64 = 15.0;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdvisorInput {
    pub city: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorResponse {
    pub city: String,
    pub advice: String,
    pub temperature: Option<f64>,
}

#[derive(Clone)]
pub struct AdvisorService {
    weather_client: Option<WeatherClient>,
}

impl AdvisorService {
    pub fn new(weather_client: Option<WeatherClient>) -> Self {
        Self { weather_client }
    }

    pub async fn advise(&self, input: AdvisorInput) -> AppResult<AdvisorResponse> {
        let city = input
            .city
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AppError::MissingField("city".to_string()))?;

        let client = self
            .weather_client
            .as_ref()
            .ok_or_else(|| AppError::ConfigurationMissing("weather.api_key".to_string()))?;
        let sample = client.current_by_city(&city).await?;

        Ok(AdvisorResponse {
            city: sample.location.unwrap_or(city),
            advice: advice_for(sample.temperature).to_string(),
            temperature: sample.temperature,
        })
    }
}

/// An unavailable reading gets the regular-care advice
pub fn advice_for(temperature: Option<f64>) -> &'static str {
    match temperature {
        Some(t) if t > HOT_ABOVE_CELSIUS => {
            "It's hot. Make sure your crops get enough water and consider mulching."
        }
        Some(t) if t < COLD_BELOW_CELSIUS => "It's cold. Protect young plants and reduce watering.",
        _ => "Ideal temperature. Continue regular irrigation and monitor weather updates.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advice_bands() {
        assert!(advice_for(Some(34.0)).starts_with("It's hot"));
        assert!(advice_for(Some(10.0)).starts_with("It's cold"));
        assert!(advice_for(Some(30.0)).starts_with("Ideal"));
        assert!(advice_for(Some(15.0)).starts_with("Ideal"));
        assert!(advice_for(None).starts_with("Ideal"));
    }

    #[tokio::test]
    async fn test_missing_city() {
        let service = AdvisorService::new(None);
        let err = service
            .advise(AdvisorInput { city: Some("  ".into()) })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MissingField(_)));
    }

    #[tokio::test]
    async fn test_missing_weather_key() {
        let service = AdvisorService::new(None);
        let err = service
            .advise(AdvisorInput { city: Some("Indore".into()) })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ConfigurationMissing(_)));
    }
}
