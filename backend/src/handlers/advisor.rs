//! Storage advisor HTTP handler

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::advisor::{AdvisorInput, AdvisorResponse, AdvisorService};
use crate::AppState;

/// Advice for the current conditions in a city
pub async fn get_storage_advice(
    State(state): State<AppState>,
    Json(input): Json<AdvisorInput>,
) -> AppResult<Json<AdvisorResponse>> {
    let service = AdvisorService::new(state.weather.clone());
    let response = service.advise(input).await?;
    Ok(Json(response))
}
