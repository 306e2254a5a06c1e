use crate::api::ApiError;
use serde_json::{json, Value};

/// Default marker size for the map layer; adjustable after construction.
pub const DEFAULT_SIZE: i64 = 35;

/// Column labels of the flat record, in display order.
pub const COLUMNS: [&str; 11] = [
    "Address",
    "Unit",
    "Price",
    "Bedrooms",
    "Bathrooms",
    "Zestimate",
    "Days on Zillow",
    "Relative Value",
    "Latitude",
    "Longitude",
    "Size",
];

/// One normalized rental listing.
///
/// Every field except the address is optional in the source payload; absence
/// becomes `None`, never an error. `relative_value` (price minus rent
/// zestimate, lower is a better deal) is derived once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Rental {
    pub address: String,
    pub unit: Option<String>,
    pub price: Option<f64>,
    pub bedrooms: Option<i64>,
    pub bathrooms: Option<i64>,
    pub zestimate: Option<i64>,
    pub days_on_zillow: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub size: i64,
    pub relative_value: i64,
}

impl Rental {
    /// Build a `Rental` from one raw listing object as returned by the
    /// Zillow `props` array. Fails only when the address is missing.
    pub fn from_raw(raw: &Value) -> Result<Self, ApiError> {
        let address = raw
            .get("address")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::MissingField("address".to_string()))?
            .to_string();

        let mut rental = Rental {
            address,
            unit: string_field(raw, "unit"),
            price: numeric_field(raw, "price"),
            bedrooms: int_field(raw, "bedrooms"),
            bathrooms: int_field(raw, "bathrooms"),
            zestimate: int_field(raw, "rentZestimate"),
            days_on_zillow: int_field(raw, "daysOnZillow"),
            latitude: raw.get("latitude").and_then(Value::as_f64),
            longitude: raw.get("longitude").and_then(Value::as_f64),
            size: DEFAULT_SIZE,
            relative_value: 0,
        };
        rental.relative_value = rental.compute_relative_value();

        Ok(rental)
    }

    /// price − zestimate, with missing operands coerced to zero.
    pub fn compute_relative_value(&self) -> i64 {
        let price = self.price.map(|p| p as i64).unwrap_or(0);
        let zestimate = self.zestimate.unwrap_or(0);
        price - zestimate
    }

    pub fn set_size(&mut self, size: i64) {
        self.size = size;
    }

    /// Flat label→value record for tables and CSV. Missing fields map to
    /// JSON null.
    pub fn to_record(&self) -> Value {
        json!({
            "Address": self.address,
            "Unit": self.unit,
            "Price": self.price,
            "Bedrooms": self.bedrooms,
            "Bathrooms": self.bathrooms,
            "Zestimate": self.zestimate,
            "Days on Zillow": self.days_on_zillow,
            "Relative Value": self.relative_value,
            "Latitude": self.latitude,
            "Longitude": self.longitude,
            "Size": self.size,
        })
    }
}

fn string_field(raw: &Value, field: &str) -> Option<String> {
    raw.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Prices occasionally arrive as strings ("2800"); accept numbers and
/// numeric strings, anything else is treated as absent.
fn numeric_field(raw: &Value, field: &str) -> Option<f64> {
    match raw.get(field) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

fn int_field(raw: &Value, field: &str) -> Option<i64> {
    raw.get(field).and_then(Value::as_i64)
}
