//! Engine constants: crop defaults, thresholds, tiers and risk bands
//!
//! `EngineConfig::default()` carries the production values. Every section is
//! `#[serde(default)]`, so a partial override only replaces what it names.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Immutable configuration injected into every strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub shelf_life: ShelfLifeDefaults,
    pub heuristic: HeuristicThresholds,
    pub hybrid: HybridRules,
    pub risk: RiskBands,
    pub explanation: ExplanationThresholds,
}

/// Nominal shelf life when no supplier expiry is given
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShelfLifeDefaults {
    /// Days keyed by lower-case crop name
    pub crop_days: BTreeMap<String, i64>,
    pub unknown_crop_days: i64,
    /// Minimum base shelf days in the hybrid model
    pub hybrid_floor_days: i64,
}

impl Default for ShelfLifeDefaults {
    fn default() -> Self {
        let crop_days = [
            ("rice", 365),
            ("wheat", 365),
            ("dal", 365),
            ("maize", 270),
            ("barley", 300),
            ("millet", 300),
            ("sorghum", 300),
        ]
        .into_iter()
        .map(|(crop, days)| (crop.to_string(), days))
        .collect();

        Self {
            crop_days,
            unknown_crop_days: 240,
            hybrid_floor_days: 30,
        }
    }
}

/// A density tier: anything strictly above `above` kg/sqm gets `pct`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityTier {
    pub above: f64,
    pub pct: f64,
}

/// Percentage-adjustment model parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicThresholds {
    pub hot_celsius: f64,
    pub hot_pct_per_degree: f64,
    pub cool_celsius: f64,
    pub cool_pct_per_degree: f64,
    pub humid_percent: f64,
    pub humid_pct_per_point: f64,
    pub dry_percent: f64,
    pub dry_pct_per_point: f64,
    /// Checked in order, first match wins
    pub dense_tiers: Vec<DensityTier>,
    pub sparse_below: f64,
    pub sparse_pct: f64,
    pub poor_insulation_pct: f64,
    pub good_insulation_pct: f64,
    pub refrigeration_pct: f64,
    /// Total is clamped to `[-max_total_pct, max_total_pct]`
    pub max_total_pct: f64,
    pub suggest_temp_pct: f64,
    pub suggest_humidity_pct: f64,
    pub suggest_density_pct: f64,
}

impl Default for HeuristicThresholds {
    fn default() -> Self {
        Self {
            hot_celsius: 28.0,
            hot_pct_per_degree: 0.02,
            cool_celsius: 12.0,
            cool_pct_per_degree: 0.01,
            humid_percent: 70.0,
            humid_pct_per_point: 0.008,
            dry_percent: 50.0,
            dry_pct_per_point: 0.004,
            dense_tiers: vec![
                DensityTier { above: 600.0, pct: 0.15 },
                DensityTier { above: 400.0, pct: 0.08 },
            ],
            sparse_below: 150.0,
            sparse_pct: -0.06,
            poor_insulation_pct: 0.08,
            good_insulation_pct: -0.05,
            refrigeration_pct: -0.25,
            max_total_pct: 0.60,
            suggest_temp_pct: 0.02,
            suggest_humidity_pct: 0.02,
            suggest_density_pct: 0.08,
        }
    }
}

/// Humidity reduction tier. `below_celsius` restricts the tier to cooler air.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HumidityReductionTier {
    pub min_humidity: f64,
    pub below_celsius: Option<f64>,
    pub days: i64,
}

/// A reduction applied when a reading is strictly above `above`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReductionTier {
    pub above: f64,
    pub days: i64,
}

/// Safety-margin rules layered on the inference estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HybridRules {
    /// First match wins within each tier list
    pub humidity_tiers: Vec<HumidityReductionTier>,
    pub temperature_tiers: Vec<ReductionTier>,
    pub density_tiers: Vec<ReductionTier>,
    pub combined_min_humidity: f64,
    pub combined_above_celsius: f64,
    pub combined_days: i64,
    pub poor_insulation_days: i64,
    pub min_predicted_days: i64,
    /// Inference estimates are clamped to `0..=max_estimate_days`
    pub max_estimate_days: i64,
    /// An already-expired prediction is reset to today plus this many days
    pub expired_reset_days: i64,
}

impl Default for HybridRules {
    fn default() -> Self {
        Self {
            humidity_tiers: vec![
                HumidityReductionTier { min_humidity: 90.0, below_celsius: Some(25.0), days: 120 },
                HumidityReductionTier { min_humidity: 85.0, below_celsius: Some(25.0), days: 90 },
                HumidityReductionTier { min_humidity: 80.0, below_celsius: None, days: 60 },
                HumidityReductionTier { min_humidity: 70.0, below_celsius: None, days: 30 },
            ],
            temperature_tiers: vec![
                ReductionTier { above: 35.0, days: 45 },
                ReductionTier { above: 30.0, days: 30 },
            ],
            density_tiers: vec![
                ReductionTier { above: 450.0, days: 45 },
                ReductionTier { above: 350.0, days: 30 },
            ],
            combined_min_humidity: 85.0,
            combined_above_celsius: 30.0,
            combined_days: 60,
            poor_insulation_days: 20,
            min_predicted_days: 30,
            max_estimate_days: 36_500,
            expired_reset_days: 30,
        }
    }
}

/// Bands used by both risk policies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskBands {
    pub remaining_high_days: i64,
    pub remaining_moderate_days: i64,
    pub high_humidity: f64,
    pub moderate_humidity: f64,
    /// In the moderate-humidity band, warmer than this is High
    pub warm_celsius: f64,
    /// In the dry band, hotter than this is Moderate
    pub hot_celsius: f64,
    pub escalate_density_above: f64,
    pub expiry_high_days: i64,
    pub expiry_moderate_days: i64,
}

impl Default for RiskBands {
    fn default() -> Self {
        Self {
            remaining_high_days: 30,
            remaining_moderate_days: 180,
            high_humidity: 80.0,
            moderate_humidity: 60.0,
            warm_celsius: 30.0,
            hot_celsius: 35.0,
            escalate_density_above: 400.0,
            expiry_high_days: 30,
            expiry_moderate_days: 90,
        }
    }
}

/// Thresholds that pick which factor messages are emitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplanationThresholds {
    pub extreme_humidity: f64,
    pub very_high_humidity: f64,
    pub high_humidity: f64,
    pub elevated_humidity: f64,
    pub extreme_celsius: f64,
    pub high_celsius: f64,
    pub extreme_density: f64,
    pub high_density: f64,
    pub low_humidity: f64,
    pub cool_celsius: f64,
    pub low_density: f64,
}

impl Default for ExplanationThresholds {
    fn default() -> Self {
        Self {
            extreme_humidity: 90.0,
            very_high_humidity: 85.0,
            high_humidity: 80.0,
            elevated_humidity: 70.0,
            extreme_celsius: 35.0,
            high_celsius: 30.0,
            extreme_density: 450.0,
            high_density: 350.0,
            low_humidity: 50.0,
            cool_celsius: 15.0,
            low_density: 150.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_crop_table() {
        let defaults = ShelfLifeDefaults::default();
        assert_eq!(defaults.crop_days.get("rice"), Some(&365));
        assert_eq!(defaults.crop_days.get("maize"), Some(&270));
        assert_eq!(defaults.crop_days.get("sorghum"), Some(&300));
        assert_eq!(defaults.unknown_crop_days, 240);
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let json = r#"{ "heuristic": { "max_total_pct": 0.5 }, "hybrid": { "min_predicted_days": 45 } }"#;
        let config: EngineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.hybrid.min_predicted_days, 45);
        assert_eq!(config.hybrid.poor_insulation_days, 20);
        assert_eq!(config.heuristic.max_total_pct, 0.5);
        assert_eq!(config.heuristic.hot_celsius, 28.0);
        assert_eq!(config.risk, RiskBands::default());
    }
}
