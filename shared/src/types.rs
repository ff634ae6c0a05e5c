//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Square feet to square metres
pub const SQFT_TO_SQM: f64 = 0.092903;

/// Kilograms per metric tonne
pub const KG_PER_TONNE: f64 = 1000.0;

/// Warehouse insulation quality
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Insulation {
    Poor,
    #[default]
    Average,
    Good,
}

impl Insulation {
    /// Parse a user-supplied insulation label. Unknown labels fall back to `Average`.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "poor" => Insulation::Poor,
            "good" => Insulation::Good,
            _ => Insulation::Average,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Insulation::Poor => "poor",
            Insulation::Average => "average",
            Insulation::Good => "good",
        }
    }
}

/// Spoilage urgency tier
///
/// Ordered so that `Low < Moderate < High`; escalation never moves down.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Move one tier up. `High` stays `High`.
    pub fn escalate(self) -> Self {
        match self {
            RiskLevel::Low => RiskLevel::Moderate,
            RiskLevel::Moderate | RiskLevel::High => RiskLevel::High,
        }
    }

    /// Raise to at least `floor`
    pub fn at_least(self, floor: RiskLevel) -> Self {
        self.max(floor)
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Moderate => write!(f, "Moderate"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// Which prediction model produced a result
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PredictionVariant {
    Heuristic,
    Hybrid,
}

impl std::fmt::Display for PredictionVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PredictionVariant::Heuristic => write!(f, "heuristic"),
            PredictionVariant::Hybrid => write!(f, "hybrid"),
        }
    }
}

pub fn tonnes_to_kg(tonnes: f64) -> f64 {
    tonnes * KG_PER_TONNE
}

pub fn sqft_to_sqm(sqft: f64) -> f64 {
    sqft * SQFT_TO_SQM
}

/// Replace NaN and infinities with zero before they reach any arithmetic
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Round half towards positive infinity, matching how day counts are reported
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
