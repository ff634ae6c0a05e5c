//! Percentage-adjustment model
//!
//! Each factor contributes a signed fraction independently. The sum is clamped
//! and applied to the base remaining days.

use super::base::{add_days, days_between, BaseShelfLifeResolver};
use super::config::{EngineConfig, HeuristicThresholds};
use super::explain;
use super::risk::{RiskPolicy, RiskSignals};
use super::{PredictionContext, PredictionStrategy};
use crate::models::{round_measure, AdjustmentContribution, Breakdown, PredictionResult, WeatherSample};
use crate::types::{round_half_up, Insulation, PredictionVariant};

/// Heuristic prediction strategy
pub struct HeuristicStrategy<'a> {
    config: &'a EngineConfig,
}

impl<'a> HeuristicStrategy<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }
}

impl PredictionStrategy for HeuristicStrategy<'_> {
    fn variant(&self) -> PredictionVariant {
        PredictionVariant::Heuristic
    }

    fn default_risk_policy(&self) -> RiskPolicy {
        RiskPolicy::RemainingDays
    }

    fn predict(&self, ctx: &PredictionContext<'_>) -> PredictionResult {
        let request = ctx.request;
        let thresholds = &self.config.heuristic;
        let density = request.storage_density();

        let base = BaseShelfLifeResolver::new(&self.config.shelf_life).resolve(
            &request.crop_type,
            request.manufacture_date,
            request.expiry_date,
        );
        let base_remaining_days = base.remaining_days(ctx.today);

        let contribution = compute_contributions(
            thresholds,
            ctx.weather,
            density,
            request.insulation,
            request.refrigeration,
        );
        let total_pct = clamp_total(thresholds, contribution.sum());
        let predicted_remaining_days = predict_remaining_days(base_remaining_days, total_pct);
        let predicted_expiry = add_days(ctx.today, predicted_remaining_days);

        let risk_level = self.risk_policy(ctx).classify(
            &self.config.risk,
            &RiskSignals {
                humidity: ctx.weather.humidity,
                temperature: ctx.weather.temperature,
                storage_density: density,
                days_until_expiry: predicted_remaining_days,
            },
        );

        PredictionResult {
            variant: self.variant(),
            crop_type: request.crop_type.clone(),
            amount_kg: request.amount_kg,
            warehouse_size_sqm: request.warehouse_size_sqm,
            storage_density: round_measure(density),
            city: ctx.city(),
            temperature: ctx.weather.temperature,
            humidity: ctx.weather.humidity,
            manufacture_date: request.manufacture_date,
            base_expiry: base.expiry,
            base_shelf_days: base.shelf_days,
            base_remaining_days,
            predicted_remaining_days,
            predicted_expiry,
            adjustment_days: days_between(base.expiry, predicted_expiry),
            risk_level,
            breakdown: Some(Breakdown::new(&contribution, total_pct)),
            adjustment_reasons: explain::heuristic_reasons(&contribution, ctx.weather),
            suggestions: explain::heuristic_suggestions(
                thresholds,
                &contribution,
                request.insulation,
                request.refrigeration,
            ),
            hybrid: None,
        }
    }
}

/// Evaluate all five factors. Unavailable readings contribute 0.
pub fn compute_contributions(
    thresholds: &HeuristicThresholds,
    weather: &WeatherSample,
    storage_density: f64,
    insulation: Insulation,
    refrigeration: bool,
) -> AdjustmentContribution {
    AdjustmentContribution {
        temp_pct: weather
            .temperature
            .map(|t| temperature_pct(thresholds, t))
            .unwrap_or(0.0),
        humidity_pct: weather
            .humidity
            .map(|h| humidity_pct(thresholds, h))
            .unwrap_or(0.0),
        density_pct: density_pct(thresholds, storage_density),
        insulation_pct: match insulation {
            Insulation::Poor => thresholds.poor_insulation_pct,
            Insulation::Good => thresholds.good_insulation_pct,
            Insulation::Average => 0.0,
        },
        refrigeration_pct: if refrigeration {
            thresholds.refrigeration_pct
        } else {
            0.0
        },
    }
}

fn temperature_pct(thresholds: &HeuristicThresholds, celsius: f64) -> f64 {
    if celsius > thresholds.hot_celsius {
        (celsius - thresholds.hot_celsius) * thresholds.hot_pct_per_degree
    } else if celsius < thresholds.cool_celsius {
        -(thresholds.cool_celsius - celsius) * thresholds.cool_pct_per_degree
    } else {
        0.0
    }
}

fn humidity_pct(thresholds: &HeuristicThresholds, humidity: f64) -> f64 {
    if humidity > thresholds.humid_percent {
        (humidity - thresholds.humid_percent) * thresholds.humid_pct_per_point
    } else if humidity < thresholds.dry_percent {
        -(thresholds.dry_percent - humidity) * thresholds.dry_pct_per_point
    } else {
        0.0
    }
}

fn density_pct(thresholds: &HeuristicThresholds, density: f64) -> f64 {
    if let Some(tier) = thresholds.dense_tiers.iter().find(|t| density > t.above) {
        return tier.pct;
    }
    if density < thresholds.sparse_below {
        thresholds.sparse_pct
    } else {
        0.0
    }
}

/// Clamp into `[-max_total_pct, max_total_pct]`
pub fn clamp_total(thresholds: &HeuristicThresholds, sum: f64) -> f64 {
    let limit = thresholds.max_total_pct.abs();
    sum.clamp(-limit, limit)
}

pub fn predict_remaining_days(base_remaining_days: i64, total_pct: f64) -> i64 {
    round_half_up(base_remaining_days as f64 * (1.0 - total_pct)).max(0)
}
