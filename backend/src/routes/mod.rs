//! Route definitions for the shelf-life prediction server

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/predictions", prediction_routes())
        .route("/advisor", post(handlers::get_storage_advice))
}

/// Shelf-life prediction routes
fn prediction_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::create_prediction))
        .route("/ml", post(handlers::create_ml_prediction))
        .route("/crops", get(handlers::list_crop_defaults))
}
