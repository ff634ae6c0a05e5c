//! Prediction request models and normalization

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::engine::RiskPolicy;
use crate::error::RequestError;
use crate::types::{finite_or_zero, sqft_to_sqm, tonnes_to_kg, Insulation};
use crate::validation::{parse_calendar_date, validate_positive_quantity};

/// Crop key used when the caller gives none
pub const DEFAULT_CROP: &str = "default";

/// A number that may arrive as a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(f64),
    Text(String),
}

impl LooseNumber {
    /// Unparseable or non-finite values coerce to zero
    pub fn to_f64(&self) -> f64 {
        match self {
            LooseNumber::Number(n) => finite_or_zero(*n),
            LooseNumber::Text(s) => s.trim().parse::<f64>().map(finite_or_zero).unwrap_or(0.0),
        }
    }

    /// The value as a finite number, if it is one
    pub fn as_finite(&self) -> Option<f64> {
        match self {
            LooseNumber::Number(n) => Some(*n),
            LooseNumber::Text(s) => s.trim().parse::<f64>().ok(),
        }
        .filter(|n| n.is_finite())
    }
}

impl From<f64> for LooseNumber {
    fn from(value: f64) -> Self {
        LooseNumber::Number(value)
    }
}

/// A flag that may arrive as a JSON boolean or as `"true"` / `"false"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseBool {
    Bool(bool),
    Text(String),
}

impl LooseBool {
    pub fn is_set(&self) -> bool {
        match self {
            LooseBool::Bool(b) => *b,
            LooseBool::Text(s) => s.trim().eq_ignore_ascii_case("true"),
        }
    }
}

/// Inbound prediction payload, before unit normalization
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PredictionInput {
    pub crop_type: Option<String>,
    pub amount_kg: Option<LooseNumber>,
    pub amount_tonnes: Option<LooseNumber>,
    pub amount_ton: Option<LooseNumber>,
    pub amount: Option<LooseNumber>,
    pub warehouse_size_sqm: Option<LooseNumber>,
    pub warehouse_size_sqft: Option<LooseNumber>,
    pub city: Option<String>,
    pub manufacture_date: Option<String>,
    pub expiry_date: Option<String>,
    pub insulation: Option<String>,
    pub refrigeration: Option<LooseBool>,
    /// Environmental override, °C
    pub temperature: Option<LooseNumber>,
    /// Environmental override, %
    #[validate(custom = "validate_humidity_override")]
    pub humidity: Option<LooseNumber>,
    /// Caller-selected risk policy; each variant has its own default
    pub risk_policy: Option<RiskPolicy>,
}

/// Normalized request: kilograms, square metres, parsed dates
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
    pub crop_type: String,
    pub amount_kg: f64,
    pub warehouse_size_sqm: f64,
    pub city: String,
    pub manufacture_date: NaiveDate,
    pub expiry_date: Option<NaiveDate>,
    pub insulation: Insulation,
    pub refrigeration: bool,
    pub temperature_override: Option<f64>,
    pub humidity_override: Option<f64>,
    pub risk_policy: Option<RiskPolicy>,
}

impl PredictionRequest {
    /// Kilograms per square metre. A zero floor area is treated as 1 sqm.
    pub fn storage_density(&self) -> f64 {
        let sqm = if self.warehouse_size_sqm == 0.0 {
            1.0
        } else {
            self.warehouse_size_sqm
        };
        self.amount_kg / sqm
    }

    /// Both environmental readings were supplied by the caller
    pub fn has_full_environment_override(&self) -> bool {
        self.temperature_override.is_some() && self.humidity_override.is_some()
    }
}

impl PredictionInput {
    /// Resolve quantity to kilograms: kg, then tonnes, then ton, then raw amount
    pub fn resolve_amount_kg(&self) -> f64 {
        let read = |v: &Option<LooseNumber>| v.as_ref().map(LooseNumber::to_f64).unwrap_or(0.0);

        let kg = read(&self.amount_kg);
        if kg != 0.0 {
            return kg;
        }
        let tonnes = read(&self.amount_tonnes);
        if tonnes != 0.0 {
            return tonnes_to_kg(tonnes);
        }
        let ton = read(&self.amount_ton);
        if ton != 0.0 {
            return tonnes_to_kg(ton);
        }
        read(&self.amount)
    }

    /// Resolve floor area to square metres: sqm, then sqft
    pub fn resolve_warehouse_sqm(&self) -> f64 {
        let sqm = self
            .warehouse_size_sqm
            .as_ref()
            .map(LooseNumber::to_f64)
            .unwrap_or(0.0);
        if sqm != 0.0 {
            return sqm;
        }
        self.warehouse_size_sqft
            .as_ref()
            .map(|v| sqft_to_sqm(v.to_f64()))
            .unwrap_or(0.0)
    }

    /// Validate and normalize into engine input
    pub fn normalize(self) -> Result<PredictionRequest, RequestError> {
        if let Err(errors) = self.validate() {
            let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
            fields.sort_by_key(|(field, _)| *field);
            if let Some((field, errs)) = fields.into_iter().next() {
                let message = errs
                    .first()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .unwrap_or_default();
                return Err(RequestError::Validation {
                    field: field.to_string(),
                    message,
                });
            }
        }

        let city = self
            .city
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(RequestError::MissingField("city"))?
            .to_string();

        let manufacture_raw = self
            .manufacture_date
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .ok_or(RequestError::MissingField("manufactureDate"))?;

        let amount_kg = self.resolve_amount_kg();
        check_quantity("amountKg", amount_kg)?;
        let warehouse_size_sqm = self.resolve_warehouse_sqm();
        check_quantity("warehouseSizeSqm", warehouse_size_sqm)?;

        let manufacture_date = parse_calendar_date("manufactureDate", manufacture_raw)?;
        let expiry_date = match self.expiry_date.as_deref().filter(|d| !d.trim().is_empty()) {
            Some(raw) => Some(parse_calendar_date("expiryDate", raw)?),
            None => None,
        };

        let crop_type = self
            .crop_type
            .as_deref()
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CROP.to_string());

        Ok(PredictionRequest {
            crop_type,
            amount_kg,
            warehouse_size_sqm,
            city,
            manufacture_date,
            expiry_date,
            insulation: self
                .insulation
                .as_deref()
                .map(Insulation::parse_lenient)
                .unwrap_or_default(),
            refrigeration: self.refrigeration.as_ref().map(LooseBool::is_set).unwrap_or(false),
            temperature_override: self.temperature.as_ref().and_then(LooseNumber::as_finite),
            humidity_override: self.humidity.as_ref().and_then(LooseNumber::as_finite),
            risk_policy: self.risk_policy,
        })
    }
}

fn validate_humidity_override(value: &LooseNumber) -> Result<(), ValidationError> {
    match value.as_finite() {
        Some(h) if !(0.0..=100.0).contains(&h) => {
            let mut error = ValidationError::new("range");
            error.message = Some("Humidity must be between 0 and 100%".into());
            Err(error)
        }
        _ => Ok(()),
    }
}

fn check_quantity(field: &'static str, value: f64) -> Result<(), RequestError> {
    if value == 0.0 {
        return Err(RequestError::MissingField(field));
    }
    validate_positive_quantity(value).map_err(|message| RequestError::Validation {
        field: field.to_string(),
        message: message.to_string(),
    })
}
