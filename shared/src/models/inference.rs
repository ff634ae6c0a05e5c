//! Payloads exchanged with the shelf-life inference service

use serde::{Deserialize, Serialize};

use crate::models::{PredictionRequest, WeatherSample};
use crate::types::finite_or_zero;

/// Feature vector sent to the inference service.
///
/// Every numeric field is finite; unavailable readings are sent as 0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InferenceFeatures {
    pub crop_type: String,
    pub amount_kg: f64,
    pub warehouse_size_sqm: f64,
    pub city: String,
    pub temperature: f64,
    pub humidity: f64,
    pub insulation: String,
    /// 1 when refrigerated, 0 otherwise
    pub refrigeration: u8,
    pub base_remaining_days: i64,
}

impl InferenceFeatures {
    pub fn from_request(
        request: &PredictionRequest,
        weather: &WeatherSample,
        base_shelf_days: i64,
    ) -> Self {
        Self {
            crop_type: request.crop_type.clone(),
            amount_kg: finite_or_zero(request.amount_kg),
            warehouse_size_sqm: finite_or_zero(request.warehouse_size_sqm),
            city: request.city.clone(),
            temperature: weather.temperature.map(finite_or_zero).unwrap_or(0.0),
            humidity: weather.humidity.map(finite_or_zero).unwrap_or(0.0),
            insulation: request.insulation.as_str().to_string(),
            refrigeration: u8::from(request.refrigeration),
            base_remaining_days: base_shelf_days,
        }
    }
}

/// Point estimate returned by the inference service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InferenceEstimate {
    pub predicted_shelf_life_days: f64,
}
