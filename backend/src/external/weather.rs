//! Weather API client for fetching current conditions
//!
//! Integrates with the OpenWeatherMap current-weather endpoint, queried by city

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use shared::WeatherSample;

use crate::error::{AppError, AppResult};

const SERVICE: &str = "Weather service";

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// OpenWeatherMap API response for current weather.
/// Readings may be absent; they map to unavailable values.
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    #[serde(default)]
    main: Option<OWMMain>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: Option<f64>,
    humidity: Option<f64>,
}

impl WeatherClient {
    /// Create a new WeatherClient with a bounded request timeout
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch current conditions for a city
    pub async fn current_by_city(&self, city: &str) -> AppResult<WeatherSample> {
        let url = format!("{}/weather", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(|e| AppError::upstream(SERVICE, format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::upstream(
                SERVICE,
                format!("API error: {} - {}", status, body),
            ));
        }

        let data: OWMCurrentResponse = response
            .json()
            .await
            .map_err(|e| AppError::upstream(SERVICE, format!("failed to parse response: {}", e)))?;

        Ok(convert_current_response(data))
    }
}

/// Convert OpenWeatherMap current response to a weather sample
fn convert_current_response(data: OWMCurrentResponse) -> WeatherSample {
    let (temperature, humidity) = data
        .main
        .map(|m| (m.temp, m.humidity))
        .unwrap_or((None, None));

    let sample = WeatherSample::new(temperature, humidity);
    match data.name.filter(|n| !n.is_empty()) {
        Some(name) => sample.with_location(name),
        None => sample,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, routing::get, Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_convert_full_response() {
        let data: OWMCurrentResponse = serde_json::from_value(json!({
            "main": { "temp": 31.5, "humidity": 82, "pressure": 1008 },
            "name": "Chennai"
        }))
        .unwrap();
        let sample = convert_current_response(data);
        assert_eq!(sample.temperature, Some(31.5));
        assert_eq!(sample.humidity, Some(82.0));
        assert_eq!(sample.location.as_deref(), Some("Chennai"));
    }

    #[test]
    fn test_convert_missing_readings() {
        let data: OWMCurrentResponse = serde_json::from_value(json!({ "main": { "temp": null } })).unwrap();
        let sample = convert_current_response(data);
        assert_eq!(sample, WeatherSample::unavailable());
    }

    #[tokio::test]
    async fn test_current_by_city_sends_query() {
        let router = Router::new().route(
            "/weather",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params.get("q").map(String::as_str), Some("Nagpur"));
                assert_eq!(params.get("units").map(String::as_str), Some("metric"));
                Json(json!({ "main": { "temp": 29.0, "humidity": 64 }, "name": "Nagpur" }))
            }),
        );
        let base_url = spawn(router).await;

        let client = WeatherClient::new("key".into(), base_url, Duration::from_secs(2)).unwrap();
        let sample = client.current_by_city("Nagpur").await.unwrap();
        assert_eq!(sample.temperature, Some(29.0));
        assert_eq!(sample.humidity, Some(64.0));
    }

    #[tokio::test]
    async fn test_error_status_is_upstream_unavailable() {
        let router = Router::new().route(
            "/weather",
            get(|| async {
                (
                    axum::http::StatusCode::NOT_FOUND,
                    Json::<Value>(json!({ "message": "city not found" })),
                )
            }),
        );
        let base_url = spawn(router).await;

        let client = WeatherClient::new("key".into(), base_url, Duration::from_secs(2)).unwrap();
        let err = client.current_by_city("Atlantis").await.unwrap_err();
        assert!(matches!(err, AppError::UpstreamUnavailable { .. }));
    }
}
