//! Safety margins layered on an external inference estimate
//!
//! The raw estimate is reduced by stackable day penalties, floored, anchored
//! to the manufacture date and finally capped by the supplier expiry.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;

use super::base::{add_days, days_between, BaseShelfLifeResolver};
use super::config::{EngineConfig, HybridRules};
use super::explain::explain_hybrid;
use super::risk::{RiskPolicy, RiskSignals};
use super::{PredictionContext, PredictionStrategy};
use crate::models::{round_measure, HybridDetails, PredictionResult, ReductionTrace, WeatherSample};
use crate::types::{finite_or_zero, round_half_up, Insulation, PredictionVariant};

/// Hybrid prediction strategy, bound to one inference estimate
pub struct HybridStrategy<'a> {
    config: &'a EngineConfig,
    raw_estimate_days: f64,
}

impl<'a> HybridStrategy<'a> {
    pub fn new(config: &'a EngineConfig, raw_estimate_days: f64) -> Self {
        Self {
            config,
            raw_estimate_days,
        }
    }
}

/// Final expiry once the reset and supplier cap are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CappedExpiry {
    pub expiry: NaiveDate,
    pub capped_by_supplier: bool,
}

impl PredictionStrategy for HybridStrategy<'_> {
    fn variant(&self) -> PredictionVariant {
        PredictionVariant::Hybrid
    }

    fn default_risk_policy(&self) -> RiskPolicy {
        RiskPolicy::MultiSignal
    }

    fn predict(&self, ctx: &PredictionContext<'_>) -> PredictionResult {
        let request = ctx.request;
        let rules = &self.config.hybrid;
        let density = rounded_density(request.storage_density());

        let base = BaseShelfLifeResolver::new(&self.config.shelf_life).resolve_with_floor(
            &request.crop_type,
            request.manufacture_date,
            request.expiry_date,
        );

        let reduction = reduction_trace(rules, ctx.weather, density, request.insulation);
        let predicted_days = reduced_days(rules, self.raw_estimate_days, &reduction);
        let CappedExpiry {
            expiry,
            capped_by_supplier,
        } = predicted_expiry(
            rules,
            request.manufacture_date,
            predicted_days,
            request.expiry_date,
            ctx.today,
        );
        let days_until_expiry = days_between(ctx.today, expiry);

        let risk_level = self.risk_policy(ctx).classify(
            &self.config.risk,
            &RiskSignals {
                humidity: ctx.weather.humidity,
                temperature: ctx.weather.temperature,
                storage_density: density,
                days_until_expiry,
            },
        );

        let explanation = explain_hybrid(
            &self.config.explanation,
            ctx.weather,
            density,
            request.insulation,
            request.refrigeration,
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
            base_remaining_days: base.remaining_days(ctx.today),
            predicted_remaining_days: days_until_expiry.max(0),
            predicted_expiry: expiry,
            adjustment_days: days_between(base.expiry, expiry),
            risk_level,
            breakdown: None,
            adjustment_reasons: explanation.adjustment_reasons(),
            suggestions: explanation.suggestions,
            hybrid: Some(HybridDetails {
                raw_estimate_days: self.raw_estimate_days,
                reduction,
                reduction_days: reduction.total(),
                predicted_shelf_life_days: predicted_days,
                supplier_expiry_date: request.expiry_date,
                capped_by_supplier,
                increasing_factors: explanation.increasing_factors,
                decreasing_factors: explanation.decreasing_factors,
            }),
        }
    }
}

/// Day penalties per category. Within a category the first matching tier wins;
/// categories stack.
pub fn reduction_trace(
    rules: &HybridRules,
    weather: &WeatherSample,
    storage_density: f64,
    insulation: Insulation,
) -> ReductionTrace {
    let humidity_days = rules
        .humidity_tiers
        .iter()
        .find(|tier| {
            weather.humidity_at_least(tier.min_humidity)
                && tier
                    .below_celsius
                    .map(|c| weather.temperature_below(c))
                    .unwrap_or(true)
        })
        .map(|tier| tier.days)
        .unwrap_or(0);

    let temperature_days = rules
        .temperature_tiers
        .iter()
        .find(|tier| weather.temperature_above(tier.above))
        .map(|tier| tier.days)
        .unwrap_or(0);

    let combined_days = if weather.humidity_at_least(rules.combined_min_humidity)
        && weather.temperature_above(rules.combined_above_celsius)
    {
        rules.combined_days
    } else {
        0
    };

    let density_days = rules
        .density_tiers
        .iter()
        .find(|tier| storage_density > tier.above)
        .map(|tier| tier.days)
        .unwrap_or(0);

    let insulation_days = if insulation == Insulation::Poor {
        rules.poor_insulation_days
    } else {
        0
    };

    ReductionTrace {
        humidity_days,
        temperature_days,
        combined_days,
        density_days,
        insulation_days,
    }
}

/// Rounded estimate minus reductions, never below the floor.
/// A non-finite estimate counts as 0; finite ones are clamped to `0..=max_estimate_days`.
pub fn reduced_days(rules: &HybridRules, raw_estimate_days: f64, reduction: &ReductionTrace) -> i64 {
    let estimate = round_half_up(finite_or_zero(raw_estimate_days)).clamp(0, rules.max_estimate_days.max(0));
    estimate
        .saturating_sub(reduction.total())
        .max(rules.min_predicted_days)
}

/// Density rounded to two decimals, as compared against the tier thresholds
fn rounded_density(storage_density: f64) -> f64 {
    round_measure(storage_density).to_f64().unwrap_or(storage_density)
}

pub fn predicted_expiry(
    rules: &HybridRules,
    manufacture: NaiveDate,
    predicted_days: i64,
    supplier_expiry: Option<NaiveDate>,
    today: NaiveDate,
) -> CappedExpiry {
    let mut expiry = add_days(manufacture, predicted_days);
    if expiry <= today {
        expiry = add_days(today, rules.expired_reset_days);
    }
    match supplier_expiry {
        Some(cap) if expiry > cap => CappedExpiry {
            expiry: cap,
            capped_by_supplier: true,
        },
        _ => CappedExpiry {
            expiry,
            capped_by_supplier: false,
        },
    }
}
