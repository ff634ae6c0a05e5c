//! Shelf-life prediction result models

use chrono::NaiveDate;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::types::{PredictionVariant, RiskLevel};

/// Signed fractional corrections. Positive shortens shelf life, negative extends it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentContribution {
    pub temp_pct: f64,
    pub humidity_pct: f64,
    pub density_pct: f64,
    pub insulation_pct: f64,
    pub refrigeration_pct: f64,
}

impl AdjustmentContribution {
    /// Unclamped sum of all five factors
    pub fn sum(&self) -> f64 {
        self.temp_pct
            + self.humidity_pct
            + self.density_pct
            + self.insulation_pct
            + self.refrigeration_pct
    }
}

/// Contributions expressed in percent, one decimal place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    #[serde(with = "rust_decimal::serde::float")]
    pub temp_pct: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub humidity_pct: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub density_pct: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub insulation_pct: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub refrigeration_pct: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_pct: Decimal,
}

impl Breakdown {
    pub fn new(contribution: &AdjustmentContribution, total: f64) -> Self {
        Self {
            temp_pct: fraction_to_percent(contribution.temp_pct),
            humidity_pct: fraction_to_percent(contribution.humidity_pct),
            density_pct: fraction_to_percent(contribution.density_pct),
            insulation_pct: fraction_to_percent(contribution.insulation_pct),
            refrigeration_pct: fraction_to_percent(contribution.refrigeration_pct),
            total_pct: fraction_to_percent(total),
        }
    }
}

/// 0.08 -> 8.0
pub fn fraction_to_percent(fraction: f64) -> Decimal {
    Decimal::from_f64_retain(fraction)
        .map(|d| {
            (d * Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        })
        .unwrap_or_default()
}

/// Round a measurement to two decimal places for reporting
pub fn round_measure(value: f64) -> Decimal {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .unwrap_or_default()
}

/// Days deducted from the inference estimate, per rule category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReductionTrace {
    pub humidity_days: i64,
    pub temperature_days: i64,
    pub combined_days: i64,
    pub density_days: i64,
    pub insulation_days: i64,
}

impl ReductionTrace {
    pub fn total(&self) -> i64 {
        self.humidity_days
            + self.temperature_days
            + self.combined_days
            + self.density_days
            + self.insulation_days
    }
}

/// Fields only the hybrid model reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HybridDetails {
    /// Raw inference estimate, as received
    pub raw_estimate_days: f64,
    pub reduction: ReductionTrace,
    pub reduction_days: i64,
    /// Estimate after safety reductions, never below the floor
    pub predicted_shelf_life_days: i64,
    pub supplier_expiry_date: Option<NaiveDate>,
    pub capped_by_supplier: bool,
    pub increasing_factors: Vec<String>,
    pub decreasing_factors: Vec<String>,
}

/// A fully explained shelf-life prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub variant: PredictionVariant,
    pub crop_type: String,
    pub amount_kg: f64,
    pub warehouse_size_sqm: f64,
    #[serde(with = "rust_decimal::serde::float")]
    pub storage_density: Decimal,
    pub city: String,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub manufacture_date: NaiveDate,
    pub base_expiry: NaiveDate,
    pub base_shelf_days: i64,
    pub base_remaining_days: i64,
    pub predicted_remaining_days: i64,
    pub predicted_expiry: NaiveDate,
    /// Signed day difference between predicted and base expiry
    pub adjustment_days: i64,
    pub risk_level: RiskLevel,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub breakdown: Option<Breakdown>,
    pub adjustment_reasons: Vec<String>,
    pub suggestions: Vec<String>,
    #[serde(flatten)]
    pub hybrid: Option<HybridDetails>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_to_percent() {
        assert_eq!(fraction_to_percent(0.08), Decimal::new(80, 1));
        assert_eq!(fraction_to_percent(-0.25), Decimal::new(-250, 1));
        assert_eq!(fraction_to_percent(0.04), Decimal::new(40, 1));
        assert_eq!(fraction_to_percent(0.0), Decimal::ZERO);
    }

    #[test]
    fn test_round_measure() {
        assert_eq!(round_measure(333.3333), Decimal::new(33333, 2));
        assert_eq!(round_measure(f64::NAN), Decimal::ZERO);
    }

    #[test]
    fn test_contribution_sum() {
        let c = AdjustmentContribution {
            temp_pct: 0.08,
            humidity_pct: 0.04,
            density_pct: 0.08,
            insulation_pct: 0.0,
            refrigeration_pct: -0.25,
        };
        assert!((c.sum() - (-0.05)).abs() < 1e-12);
    }

    #[test]
    fn test_reduction_trace_total() {
        let trace = ReductionTrace {
            humidity_days: 60,
            temperature_days: 30,
            combined_days: 60,
            density_days: 45,
            insulation_days: 20,
        };
        assert_eq!(trace.total(), 215);
    }

    #[test]
    fn test_breakdown_serializes_as_numbers() {
        let c = AdjustmentContribution {
            temp_pct: 0.08,
            ..Default::default()
        };
        let json = serde_json::to_value(Breakdown::new(&c, 0.08)).unwrap();
        assert_eq!(json["tempPct"], 8.0);
        assert_eq!(json["totalPct"], 8.0);
        assert_eq!(json["humidityPct"], 0.0);
    }
}
