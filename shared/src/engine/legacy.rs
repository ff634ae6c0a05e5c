//! Quick perishables estimate, kept for the browser calculator

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    Refrigerated,
    Open,
    #[default]
    Ambient,
}

impl StorageType {
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "refrigerated" => StorageType::Refrigerated,
            "open" => StorageType::Open,
            _ => StorageType::Ambient,
        }
    }
}

fn legacy_base_days(food_type: &str) -> i64 {
    match food_type.trim().to_lowercase().as_str() {
        "tomato" => 5,
        "rice" => 90,
        "wheat" => 30,
        "mango" => 7,
        "onion" => 14,
        _ => 10,
    }
}

/// Whole days until spoilage, at least 1
pub fn legacy_spoilage_days(
    food_type: &str,
    temperature: f64,
    humidity: f64,
    storage: StorageType,
) -> i64 {
    let mut days = legacy_base_days(food_type);

    if temperature > 30.0 {
        days -= 2;
    } else if temperature < 15.0 {
        days += 1;
    }

    if humidity > 70.0 {
        days -= 1;
    } else if humidity < 40.0 {
        days += 1;
    }

    match storage {
        StorageType::Refrigerated => days += 3,
        StorageType::Open => days -= 2,
        StorageType::Ambient => {}
    }

    days.max(1)
}
