//! Human-readable reasons and suggestions

use super::config::{ExplanationThresholds, HeuristicThresholds};
use crate::models::{round_measure, AdjustmentContribution, WeatherSample};
use crate::types::{round_half_up, Insulation};

/// Factor messages for the hybrid model
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HybridExplanation {
    pub decreasing_factors: Vec<String>,
    pub increasing_factors: Vec<String>,
    pub suggestions: Vec<String>,
}

impl HybridExplanation {
    /// Decreasing factors followed by increasing ones
    pub fn adjustment_reasons(&self) -> Vec<String> {
        self.decreasing_factors
            .iter()
            .chain(self.increasing_factors.iter())
            .cloned()
            .collect()
    }
}

/// Rounded before the sign is dropped, so -10.5 % reads as 10
fn whole_percent(fraction: f64) -> i64 {
    round_half_up(fraction * 100.0).abs()
}

/// One line per non-zero heuristic contribution
pub fn heuristic_reasons(contribution: &AdjustmentContribution, weather: &WeatherSample) -> Vec<String> {
    let mut reasons = Vec::new();

    if let Some(t) = weather.temperature {
        if contribution.temp_pct > 0.0 {
            reasons.push(format!(
                "Reduced by {}% due to high temperature ({}°C)",
                whole_percent(contribution.temp_pct),
                t
            ));
        } else if contribution.temp_pct < 0.0 {
            reasons.push(format!(
                "Extended by {}% due to low temperature ({}°C)",
                whole_percent(contribution.temp_pct),
                t
            ));
        }
    }

    if let Some(h) = weather.humidity {
        if contribution.humidity_pct > 0.0 {
            reasons.push(format!(
                "Reduced by {}% due to high humidity ({}%)",
                whole_percent(contribution.humidity_pct),
                h
            ));
        } else if contribution.humidity_pct < 0.0 {
            reasons.push(format!(
                "Extended by {}% due to low humidity ({}%)",
                whole_percent(contribution.humidity_pct),
                h
            ));
        }
    }

    if contribution.density_pct > 0.0 {
        reasons.push("Reduced shelf life due to high storage density".to_string());
    } else if contribution.density_pct < 0.0 {
        reasons.push("Extended shelf life due to low storage density".to_string());
    }

    if contribution.insulation_pct > 0.0 {
        reasons.push("Reduced due to poor insulation".to_string());
    } else if contribution.insulation_pct < 0.0 {
        reasons.push("Extended due to good insulation".to_string());
    }

    if contribution.refrigeration_pct < 0.0 {
        reasons.push("Extended due to refrigeration/cooling".to_string());
    }

    reasons
}

pub fn heuristic_suggestions(
    thresholds: &HeuristicThresholds,
    contribution: &AdjustmentContribution,
    insulation: Insulation,
    refrigeration: bool,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    if contribution.temp_pct > thresholds.suggest_temp_pct {
        suggestions.push("Temperatures are high: improve ventilation or cooling.".to_string());
    }
    if contribution.humidity_pct > thresholds.suggest_humidity_pct {
        suggestions.push("High humidity: use dehumidifiers and moisture-proof packaging.".to_string());
    }
    if contribution.density_pct > thresholds.suggest_density_pct {
        suggestions.push("Storage density is high: reduce stacking and increase airflow.".to_string());
    }
    if insulation == Insulation::Poor {
        suggestions.push("Upgrade insulation to reduce temperature swings.".to_string());
    }
    if !refrigeration {
        suggestions
            .push("Consider refrigeration or temporary cooling for high-value lots.".to_string());
    }

    suggestions
}

/// Build hybrid factor messages. At most one message per humidity, temperature
/// and density band; the most severe band wins.
pub fn explain_hybrid(
    thresholds: &ExplanationThresholds,
    weather: &WeatherSample,
    storage_density: f64,
    insulation: Insulation,
    refrigeration: bool,
) -> HybridExplanation {
    let mut out = HybridExplanation::default();
    let mut decrease = |factor: String, suggestion: &str| {
        out.decreasing_factors.push(factor);
        out.suggestions.push(suggestion.to_string());
    };

    if let Some(h) = weather.humidity {
        if h >= thresholds.extreme_humidity {
            decrease(
                format!("Extreme humidity ({h}%) creates severe mold and fungal growth risk, reducing shelf life by ~4 months"),
                "URGENT: Install industrial dehumidifiers and ensure 24/7 ventilation",
            );
        } else if h >= thresholds.very_high_humidity {
            decrease(
                format!("Very high humidity ({h}%) significantly increases mold and spoilage risk, reducing shelf life by ~3 months"),
                "Install dehumidifiers and ensure proper ventilation immediately",
            );
        } else if h >= thresholds.high_humidity {
            decrease(
                format!("High humidity ({h}%) increases spoilage risk"),
                "Use dehumidifiers and moisture-proof packaging",
            );
        } else if h >= thresholds.elevated_humidity {
            decrease(
                format!("Moderate-high humidity ({h}%) may affect shelf life"),
                "Monitor humidity levels and use moisture barriers",
            );
        }
    }

    if let Some(t) = weather.temperature {
        if t > thresholds.extreme_celsius {
            decrease(
                format!("Extreme temperature ({t}°C) rapidly accelerates spoilage"),
                "Install cooling systems immediately",
            );
        } else if t > thresholds.high_celsius {
            decrease(
                format!("High temperature ({t}°C) accelerates spoilage"),
                "Improve cooling systems or add ventilation",
            );
        }
    }

    let density = round_measure(storage_density);
    if storage_density > thresholds.extreme_density {
        decrease(
            format!("Extremely high storage density ({density} kg/sqm) severely restricts airflow and creates hotspots"),
            "CRITICAL: Reduce stacking to max 400 kg/sqm or split inventory to additional warehouse",
        );
    } else if storage_density > thresholds.high_density {
        decrease(
            format!("Very high storage density ({density} kg/sqm) restricts airflow"),
            "Reduce stacking height and increase spacing between batches",
        );
    }

    if insulation == Insulation::Poor {
        decrease(
            "Poor insulation causes temperature fluctuations".to_string(),
            "Upgrade warehouse insulation",
        );
    }

    if weather.humidity_below(thresholds.low_humidity) {
        if let Some(h) = weather.humidity {
            out.increasing_factors
                .push(format!("Low humidity ({h}%) helps preserve quality"));
        }
    }
    if weather.temperature_below(thresholds.cool_celsius) {
        if let Some(t) = weather.temperature {
            out.increasing_factors
                .push(format!("Cool temperature ({t}°C) helps preserve quality"));
        }
    }
    if storage_density < thresholds.low_density {
        out.increasing_factors.push(format!(
            "Low storage density ({density} kg/sqm) allows excellent air circulation"
        ));
    }
    if refrigeration {
        out.increasing_factors
            .push("Refrigeration significantly extends shelf life".to_string());
    }
    if insulation == Insulation::Good {
        out.increasing_factors
            .push("Good insulation helps maintain stable conditions".to_string());
    }

    out
}
