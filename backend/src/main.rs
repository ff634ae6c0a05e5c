//! Grain Shelf-Life Prediction - Backend Server
//!
//! Predicts how long a stored grain batch stays usable, from warehouse
//! conditions, live weather and an external inference service.

use axum::{extract::State, http::Request, routing::get, Router};
use shared::EngineConfig;
use std::{sync::Arc, time::Duration};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;

pub use config::Config;
use external::{InferenceClient, WeatherClient};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub engine: Arc<EngineConfig>,
    /// Absent when no weather API key is configured
    pub weather: Option<WeatherClient>,
    pub inference: InferenceClient,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shelf_life_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Shelf-Life Prediction Server");
    tracing::info!("Environment: {}", config.environment);

    let weather = match config.weather.api_key.as_deref().filter(|k| !k.is_empty()) {
        Some(key) => Some(WeatherClient::new(
            key.to_string(),
            config.weather.api_endpoint.clone(),
            Duration::from_secs(config.weather.timeout_secs),
        )?),
        None => {
            tracing::warn!("No weather API key configured; live weather lookups will fail");
            None
        }
    };

    let inference = InferenceClient::new(
        config.inference.endpoint.clone(),
        Duration::from_secs(config.inference.timeout_secs),
    )?;
    tracing::info!("Inference service: {}", config.inference.endpoint);

    // Create application state
    let state = AppState {
        engine: Arc::new(config.engine.clone()),
        config: Arc::new(config.clone()),
        weather,
        inference,
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = config.bind_address();
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
        tracing::info_span!(
            "request",
            id = %Uuid::new_v4(),
            method = %request.method(),
            uri = %request.uri(),
        )
    });

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(trace)
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root(State(state): State<AppState>) -> String {
    format!(
        "Grain Shelf-Life Prediction API v1.0 ({})",
        state.config.environment
    )
}
