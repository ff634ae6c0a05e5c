//! Shelf-life prediction HTTP handlers

use axum::{extract::State, Json};
use chrono::Utc;
use shared::{PredictionInput, PredictionResult};

use crate::error::AppResult;
use crate::services::prediction::{CropDefaults, PredictionService};
use crate::AppState;

fn service(state: &AppState) -> PredictionService {
    PredictionService::new(
        state.engine.clone(),
        state.weather.clone(),
        state.inference.clone(),
    )
}

/// Heuristic prediction
pub async fn create_prediction(
    State(state): State<AppState>,
    Json(input): Json<PredictionInput>,
) -> AppResult<Json<PredictionResult>> {
    let result = service(&state)
        .predict_heuristic(input, Utc::now().date_naive())
        .await?;
    Ok(Json(result))
}

/// Hybrid prediction backed by the inference service
pub async fn create_ml_prediction(
    State(state): State<AppState>,
    Json(input): Json<PredictionInput>,
) -> AppResult<Json<PredictionResult>> {
    let result = service(&state)
        .predict_hybrid(input, Utc::now().date_naive())
        .await?;
    Ok(Json(result))
}

/// Default shelf life per crop
pub async fn list_crop_defaults(State(state): State<AppState>) -> Json<CropDefaults> {
    Json(service(&state).crop_defaults())
}
