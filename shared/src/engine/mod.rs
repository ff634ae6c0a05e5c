//! Shelf-life prediction engine
//!
//! Strategies are pure: every input (request, weather, the current date and
//! the engine configuration) is passed in explicitly.

mod base;
mod config;
mod explain;
mod heuristic;
mod hybrid;
mod legacy;
mod risk;

pub use base::*;
pub use config::*;
pub use explain::*;
pub use heuristic::*;
pub use hybrid::*;
pub use legacy::*;
pub use risk::*;

use chrono::NaiveDate;

use crate::models::{PredictionRequest, PredictionResult, WeatherSample};
use crate::types::PredictionVariant;

/// Everything a strategy needs for one prediction
#[derive(Debug, Clone, Copy)]
pub struct PredictionContext<'a> {
    pub request: &'a PredictionRequest,
    /// Effective readings, overrides already applied
    pub weather: &'a WeatherSample,
    pub today: NaiveDate,
}

impl PredictionContext<'_> {
    /// Location reported back to the caller
    pub fn city(&self) -> String {
        self.weather
            .location
            .clone()
            .unwrap_or_else(|| self.request.city.clone())
    }
}

/// A prediction variant
pub trait PredictionStrategy {
    fn variant(&self) -> PredictionVariant;

    /// Policy used when the request does not pick one
    fn default_risk_policy(&self) -> RiskPolicy;

    fn risk_policy(&self, ctx: &PredictionContext<'_>) -> RiskPolicy {
        ctx.request
            .risk_policy
            .unwrap_or_else(|| self.default_risk_policy())
    }

    fn predict(&self, ctx: &PredictionContext<'_>) -> PredictionResult;
}
