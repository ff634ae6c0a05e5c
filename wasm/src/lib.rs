//! WebAssembly module for the shelf-life prediction platform
//!
//! Provides client-side computation for:
//! - Heuristic shelf-life previews from form input
//! - Risk classification
//! - The quick perishables calculator
//! - Unit conversions

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

use shared::{
    legacy_spoilage_days, BaseShelfLifeResolver, EngineConfig, HeuristicStrategy,
    PredictionContext, PredictionStrategy, RiskBands, RiskPolicy, RiskSignals, StorageType,
};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("shelf-life wasm module loaded"));
}

/// Heuristic preview. `input_json` is the same payload the server accepts;
/// `weather_json` is `{"temperature": .., "humidity": ..}` with either reading optional.
/// Returns the serialized prediction.
#[wasm_bindgen]
pub fn preview_heuristic(input_json: &str, weather_json: &str) -> Result<String, JsValue> {
    let today = today_utc()?;
    preview_heuristic_on(input_json, weather_json, today).map_err(|e| {
        web_sys::console::warn_1(&JsValue::from_str(&e));
        JsValue::from_str(&e)
    })
}

fn preview_heuristic_on(
    input_json: &str,
    weather_json: &str,
    today: NaiveDate,
) -> Result<String, String> {
    let input: PredictionInput =
        serde_json::from_str(input_json).map_err(|e| format!("Invalid input JSON: {}", e))?;
    let weather: WeatherSample =
        serde_json::from_str(weather_json).map_err(|e| format!("Invalid weather JSON: {}", e))?;

    let request = input.normalize().map_err(|e| e.to_string())?;
    let weather = WeatherSample::new(weather.temperature, weather.humidity)
        .overridden_by(request.temperature_override, request.humidity_override);

    let config = EngineConfig::default();
    let result = HeuristicStrategy::new(&config).predict(&PredictionContext {
        request: &request,
        weather: &weather,
        today,
    });

    serde_json::to_string(&result).map_err(|e| format!("Failed to serialize result: {}", e))
}

fn today_utc() -> Result<NaiveDate, JsValue> {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_utc_full_year() as i32,
        now.get_utc_month() + 1,
        now.get_utc_date(),
    )
    .ok_or_else(|| JsValue::from_str("Browser clock returned an invalid date"))
}

/// Classify risk. `policy` is `"remaining_days"` or `"multi_signal"`; negative
/// humidity or temperature means the reading is unavailable.
#[wasm_bindgen]
pub fn classify_risk(
    policy: &str,
    humidity: f64,
    temperature: f64,
    storage_density: f64,
    days_until_expiry: i32,
) -> String {
    let policy = match policy {
        "remaining_days" => RiskPolicy::RemainingDays,
        _ => RiskPolicy::MultiSignal,
    };
    let reading = |v: f64| Some(v).filter(|v| v.is_finite() && *v >= 0.0);

    let level = policy.classify(
        &RiskBands::default(),
        &RiskSignals {
            humidity: reading(humidity),
            temperature: reading(temperature),
            storage_density,
            days_until_expiry: i64::from(days_until_expiry),
        },
    );
    level.to_string()
}

/// Quick perishables estimate in days
#[wasm_bindgen]
pub fn quick_spoilage_days(food_type: &str, temperature: f64, humidity: f64, storage: &str) -> i32 {
    let days = legacy_spoilage_days(
        food_type,
        temperature,
        humidity,
        StorageType::parse_lenient(storage),
    );
    i32::try_from(days).unwrap_or(i32::MAX)
}

/// Default shelf life for a crop, ignoring environment
#[wasm_bindgen]
pub fn default_shelf_life_days(crop_type: &str) -> i32 {
    let config = EngineConfig::default();
    let days = BaseShelfLifeResolver::new(&config.shelf_life).default_days(crop_type);
    i32::try_from(days).unwrap_or(i32::MAX)
}

/// Kilograms per square metre from tonnes and square feet
#[wasm_bindgen]
pub fn storage_density_from_imperial(tonnes: f64, sqft: f64) -> f64 {
    let sqm = sqft_to_sqm(sqft);
    if sqm <= 0.0 {
        return 0.0;
    }
    tonnes_to_kg(tonnes) / sqm
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_preview_heuristic() {
        let input = r#"{
            "cropType": "wheat",
            "amountKg": 10000,
            "warehouseSizeSqm": 20,
            "city": "Ludhiana",
            "manufactureDate": "2024-07-20",
            "expiryDate": "2025-07-20"
        }"#;
        let weather = r#"{ "temperature": 32, "humidity": 75 }"#;

        let json = preview_heuristic_on(input, weather, date(2025, 1, 1)).unwrap();
        let result: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(result["predictedRemainingDays"], 160);
        assert_eq!(result["riskLevel"], "Moderate");
    }

    #[test]
    fn test_preview_reports_request_errors() {
        let err = preview_heuristic_on(r#"{ "cropType": "rice" }"#, "{}", date(2025, 1, 1)).unwrap_err();
        assert!(err.contains("city"));

        let err = preview_heuristic_on("not json", "{}", date(2025, 1, 1)).unwrap_err();
        assert!(err.starts_with("Invalid input JSON"));
    }

    #[test]
    fn test_classify_risk() {
        assert_eq!(classify_risk("remaining_days", -1.0, -1.0, 0.0, 200), "Low");
        assert_eq!(classify_risk("multi_signal", 85.0, 20.0, 100.0, 300), "High");
        assert_eq!(classify_risk("multi_signal", 50.0, 20.0, 450.0, 300), "Moderate");
        assert_eq!(classify_risk("multi_signal", -1.0, -1.0, 100.0, 60), "Moderate");
    }

    #[test]
    fn test_quick_spoilage_days() {
        assert_eq!(quick_spoilage_days("tomato", 40.0, 90.0, "open"), 1);
        assert_eq!(quick_spoilage_days("rice", 25.0, 50.0, "refrigerated"), 93);
    }

    #[test]
    fn test_default_shelf_life_days() {
        assert_eq!(default_shelf_life_days("Maize"), 270);
        assert_eq!(default_shelf_life_days("teff"), 240);
    }

    #[test]
    fn test_storage_density_from_imperial() {
        let density = storage_density_from_imperial(1.0, 1000.0);
        assert!((density - 1000.0 / 92.903).abs() < 1e-6);
        assert_eq!(storage_density_from_imperial(1.0, 0.0), 0.0);
    }
}
