//! Prediction service: gathers weather and inference inputs, then runs a strategy

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use shared::{
    expiry_precedes_manufacture, BaseShelfLifeResolver, EngineConfig, HeuristicStrategy,
    HybridStrategy, InferenceFeatures, PredictionContext, PredictionInput, PredictionRequest,
    PredictionResult, PredictionStrategy, WeatherSample,
};

use crate::error::{AppError, AppResult};
use crate::external::{InferenceClient, WeatherClient};

/// Prediction service for both variants
#[derive(Clone)]
pub struct PredictionService {
    engine: Arc<EngineConfig>,
    weather_client: Option<WeatherClient>,
    inference_client: InferenceClient,
}

/// Default shelf life for one crop
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropDefault {
    pub crop_type: String,
    pub default_days: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropDefaults {
    pub crops: Vec<CropDefault>,
    pub unknown_crop_days: i64,
}

impl PredictionService {
    pub fn new(
        engine: Arc<EngineConfig>,
        weather_client: Option<WeatherClient>,
        inference_client: InferenceClient,
    ) -> Self {
        Self {
            engine,
            weather_client,
            inference_client,
        }
    }

    /// Percentage-adjustment prediction. Weather is required unless both
    /// readings are overridden.
    pub async fn predict_heuristic(
        &self,
        input: PredictionInput,
        today: NaiveDate,
    ) -> AppResult<PredictionResult> {
        let request = input.normalize()?;
        warn_on_inverted_dates(&request);

        let weather = if request.has_full_environment_override() {
            override_only(&request)
        } else {
            self.fetch_weather(&request.city)
                .await?
                .overridden_by(request.temperature_override, request.humidity_override)
        };

        let strategy = HeuristicStrategy::new(&self.engine);
        let result = strategy.predict(&PredictionContext {
            request: &request,
            weather: &weather,
            today,
        });

        tracing::info!(
            crop = %result.crop_type,
            city = %result.city,
            remaining_days = result.predicted_remaining_days,
            risk = %result.risk_level,
            "Heuristic prediction computed"
        );

        Ok(result)
    }

    /// Inference-backed prediction. A weather outage degrades to unavailable
    /// readings; an inference outage fails the request.
    pub async fn predict_hybrid(
        &self,
        input: PredictionInput,
        today: NaiveDate,
    ) -> AppResult<PredictionResult> {
        let request = input.normalize()?;
        warn_on_inverted_dates(&request);

        let weather = if request.has_full_environment_override() {
            override_only(&request)
        } else {
            let fetched = match self.fetch_weather(&request.city).await {
                Ok(sample) => sample,
                Err(err @ AppError::ConfigurationMissing(_)) => return Err(err),
                Err(err) => {
                    tracing::warn!(
                        "Weather unavailable for {}, continuing without it: {}",
                        request.city,
                        err
                    );
                    WeatherSample::unavailable()
                }
            };
            fetched.overridden_by(request.temperature_override, request.humidity_override)
        };

        let base = BaseShelfLifeResolver::new(&self.engine.shelf_life).resolve_with_floor(
            &request.crop_type,
            request.manufacture_date,
            request.expiry_date,
        );
        let features = InferenceFeatures::from_request(&request, &weather, base.shelf_days);

        tracing::debug!("Requesting inference estimate: {:?}", features);
        let estimate = self.inference_client.estimate(&features).await?;

        let strategy = HybridStrategy::new(&self.engine, estimate.predicted_shelf_life_days);
        let result = strategy.predict(&PredictionContext {
            request: &request,
            weather: &weather,
            today,
        });

        tracing::info!(
            crop = %result.crop_type,
            city = %result.city,
            raw_estimate = estimate.predicted_shelf_life_days,
            expiry = %result.predicted_expiry,
            capped = result.hybrid.as_ref().map(|h| h.capped_by_supplier).unwrap_or(false),
            risk = %result.risk_level,
            "Hybrid prediction computed"
        );

        Ok(result)
    }

    /// Crop default table, sorted by crop name
    pub fn crop_defaults(&self) -> CropDefaults {
        let defaults = &self.engine.shelf_life;
        CropDefaults {
            crops: defaults
                .crop_days
                .iter()
                .map(|(crop, days)| CropDefault {
                    crop_type: crop.clone(),
                    default_days: *days,
                })
                .collect(),
            unknown_crop_days: defaults.unknown_crop_days,
        }
    }

    async fn fetch_weather(&self, city: &str) -> AppResult<WeatherSample> {
        let client = self
            .weather_client
            .as_ref()
            .ok_or_else(|| AppError::ConfigurationMissing("weather.api_key".to_string()))?;
        client.current_by_city(city).await
    }
}

fn warn_on_inverted_dates(request: &PredictionRequest) {
    if expiry_precedes_manufacture(request.manufacture_date, request.expiry_date) {
        tracing::warn!(
            "Supplier expiry precedes manufacture date for {} in {}",
            request.crop_type,
            request.city
        );
    }
}

fn override_only(request: &PredictionRequest) -> WeatherSample {
    WeatherSample::new(request.temperature_override, request.humidity_override)
        .with_location(request.city.clone())
}
