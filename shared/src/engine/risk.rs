//! Risk tier classification
//!
//! Two policies coexist and the caller picks one:
//! - `RemainingDays` bands the predicted remaining days only.
//! - `MultiSignal` starts from humidity/temperature bands, escalates on dense
//!   storage, then escalates again when expiry is near. It never downgrades.

use serde::{Deserialize, Serialize};

use super::config::RiskBands;
use crate::types::RiskLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskPolicy {
    RemainingDays,
    MultiSignal,
}

/// Inputs consulted by the risk policies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskSignals {
    pub humidity: Option<f64>,
    pub temperature: Option<f64>,
    pub storage_density: f64,
    /// Signed days from today until the final predicted expiry
    pub days_until_expiry: i64,
}

impl RiskPolicy {
    pub fn classify(&self, bands: &RiskBands, signals: &RiskSignals) -> RiskLevel {
        match self {
            RiskPolicy::RemainingDays => classify_by_remaining_days(bands, signals.days_until_expiry),
            RiskPolicy::MultiSignal => classify_multi_signal(bands, signals),
        }
    }
}

pub fn classify_by_remaining_days(bands: &RiskBands, remaining_days: i64) -> RiskLevel {
    if remaining_days <= bands.remaining_high_days {
        RiskLevel::High
    } else if remaining_days <= bands.remaining_moderate_days {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

pub fn classify_multi_signal(bands: &RiskBands, signals: &RiskSignals) -> RiskLevel {
    let humid = |t: f64| signals.humidity.map(|h| h >= t).unwrap_or(false);
    let warmer = |t: f64| signals.temperature.map(|c| c > t).unwrap_or(false);

    let mut level = if humid(bands.high_humidity) {
        RiskLevel::High
    } else if humid(bands.moderate_humidity) {
        if warmer(bands.warm_celsius) {
            RiskLevel::High
        } else {
            RiskLevel::Moderate
        }
    } else if warmer(bands.hot_celsius) {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    };

    if signals.storage_density > bands.escalate_density_above {
        level = level.escalate();
    }

    if signals.days_until_expiry <= bands.expiry_high_days {
        level = RiskLevel::High;
    } else if signals.days_until_expiry <= bands.expiry_moderate_days {
        level = level.at_least(RiskLevel::Moderate);
    }

    level
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn signals(humidity: Option<f64>, temperature: Option<f64>, density: f64, days: i64) -> RiskSignals {
        RiskSignals {
            humidity,
            temperature,
            storage_density: density,
            days_until_expiry: days,
        }
    }

    #[test]
    fn test_remaining_days_bands() {
        let bands = RiskBands::default();
        assert_eq!(classify_by_remaining_days(&bands, 0), RiskLevel::High);
        assert_eq!(classify_by_remaining_days(&bands, 30), RiskLevel::High);
        assert_eq!(classify_by_remaining_days(&bands, 31), RiskLevel::Moderate);
        assert_eq!(classify_by_remaining_days(&bands, 180), RiskLevel::Moderate);
        assert_eq!(classify_by_remaining_days(&bands, 181), RiskLevel::Low);
    }

    #[test]
    fn test_multi_signal_humidity_bands() {
        let bands = RiskBands::default();
        let far = 365;
        assert_eq!(classify_multi_signal(&bands, &signals(Some(80.0), Some(10.0), 100.0, far)), RiskLevel::High);
        assert_eq!(classify_multi_signal(&bands, &signals(Some(65.0), Some(31.0), 100.0, far)), RiskLevel::High);
        assert_eq!(classify_multi_signal(&bands, &signals(Some(65.0), Some(30.0), 100.0, far)), RiskLevel::Moderate);
        assert_eq!(classify_multi_signal(&bands, &signals(Some(40.0), Some(36.0), 100.0, far)), RiskLevel::Moderate);
        assert_eq!(classify_multi_signal(&bands, &signals(Some(40.0), Some(35.0), 100.0, far)), RiskLevel::Low);
    }

    #[test]
    fn test_multi_signal_density_escalation() {
        let bands = RiskBands::default();
        assert_eq!(classify_multi_signal(&bands, &signals(Some(40.0), Some(20.0), 401.0, 365)), RiskLevel::Moderate);
        assert_eq!(classify_multi_signal(&bands, &signals(Some(65.0), Some(20.0), 401.0, 365)), RiskLevel::High);
        assert_eq!(classify_multi_signal(&bands, &signals(Some(40.0), Some(20.0), 400.0, 365)), RiskLevel::Low);
    }

    #[test]
    fn test_multi_signal_expiry_override() {
        let bands = RiskBands::default();
        assert_eq!(classify_multi_signal(&bands, &signals(Some(40.0), Some(20.0), 100.0, 30)), RiskLevel::High);
        assert_eq!(classify_multi_signal(&bands, &signals(Some(40.0), Some(20.0), 100.0, 90)), RiskLevel::Moderate);
        assert_eq!(classify_multi_signal(&bands, &signals(Some(85.0), Some(20.0), 100.0, 90)), RiskLevel::High);
        assert_eq!(classify_multi_signal(&bands, &signals(Some(40.0), Some(20.0), 100.0, -5)), RiskLevel::High);
    }

    #[test]
    fn test_multi_signal_unavailable_weather() {
        let bands = RiskBands::default();
        assert_eq!(classify_multi_signal(&bands, &signals(None, None, 100.0, 365)), RiskLevel::Low);
        assert_eq!(classify_multi_signal(&bands, &signals(None, Some(36.0), 100.0, 365)), RiskLevel::Moderate);
    }

    #[test]
    fn test_policy_dispatch() {
        let bands = RiskBands::default();
        let s = signals(Some(85.0), Some(20.0), 100.0, 200);
        assert_eq!(RiskPolicy::RemainingDays.classify(&bands, &s), RiskLevel::Low);
        assert_eq!(RiskPolicy::MultiSignal.classify(&bands, &s), RiskLevel::High);
    }

    fn humidity_strategy() -> impl Strategy<Value = f64> {
        (0u32..=1000u32).prop_map(|n| n as f64 / 10.0)
    }

    fn temperature_strategy() -> impl Strategy<Value = f64> {
        (-100i32..=500i32).prop_map(|n| n as f64 / 10.0)
    }

    fn density_strategy() -> impl Strategy<Value = f64> {
        (0u32..=10000u32).prop_map(|n| n as f64 / 10.0)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Dropping a signal never raises the tier
        #[test]
        fn prop_removing_a_signal_never_raises_risk(
            humidity in humidity_strategy(),
            temperature in temperature_strategy(),
            density in density_strategy(),
            days in -30i64..=400i64
        ) {
            let bands = RiskBands::default();
            let full = classify_multi_signal(&bands, &signals(Some(humidity), Some(temperature), density, days));
            let no_humidity = classify_multi_signal(&bands, &signals(None, Some(temperature), density, days));
            let no_temperature = classify_multi_signal(&bands, &signals(Some(humidity), None, density, days));
            let sparse = classify_multi_signal(&bands, &signals(Some(humidity), Some(temperature), 0.0, days));

            prop_assert!(full >= no_humidity);
            prop_assert!(full >= no_temperature);
            prop_assert!(full >= sparse);
        }

        /// Higher humidity, temperature or density never lowers the tier
        #[test]
        fn prop_escalating_inputs_never_lower_risk(
            humidity in humidity_strategy(),
            temperature in temperature_strategy(),
            density in density_strategy(),
            bump in 0u32..=300u32,
            days in -30i64..=400i64
        ) {
            let bands = RiskBands::default();
            let delta = bump as f64 / 10.0;
            let base = classify_multi_signal(&bands, &signals(Some(humidity), Some(temperature), density, days));
            let wetter = classify_multi_signal(&bands, &signals(Some((humidity + delta).min(100.0)), Some(temperature), density, days));
            let hotter = classify_multi_signal(&bands, &signals(Some(humidity), Some(temperature + delta), density, days));
            let denser = classify_multi_signal(&bands, &signals(Some(humidity), Some(temperature), density + delta, days));

            prop_assert!(wetter >= base);
            prop_assert!(hotter >= base);
            prop_assert!(denser >= base);
        }
    }
}
