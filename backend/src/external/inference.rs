//! Shelf-life inference client
//!
//! Client for the model service that returns a raw shelf-life estimate.

use std::time::Duration;

use reqwest::Client;
use shared::{InferenceEstimate, InferenceFeatures};

use crate::error::{AppError, AppResult};

const SERVICE: &str = "Inference service";

/// Client for the inference microservice
#[derive(Clone)]
pub struct InferenceClient {
    endpoint: String,
    http_client: Client,
}

impl InferenceClient {
    /// Create a new inference client
    pub fn new(endpoint: String, timeout: Duration) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    /// Request a raw estimate. Timeouts and non-success statuses are upstream failures.
    pub async fn estimate(&self, features: &InferenceFeatures) -> AppResult<InferenceEstimate> {
        let url = format!("{}/predict", self.endpoint);

        let response = self
            .http_client
            .post(&url)
            .json(features)
            .send()
            .await
            .map_err(|e| AppError::upstream(SERVICE, format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::upstream(
                SERVICE,
                format!("API returned {}: {}", status, body),
            ));
        }

        let result: InferenceEstimate = response
            .json()
            .await
            .map_err(|e| AppError::upstream(SERVICE, format!("failed to parse response: {}", e)))?;

        Ok(result)
    }
}
