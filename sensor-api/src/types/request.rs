//! Request payloads accepted by the measurement routes.
use sensor_database::types::{MeasurementChanges, MeasurementId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Raw query string pairs, repeated keys are kept.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Every value sent for `name`, in request order.
    pub fn values(&self, name: &str) -> Vec<String> {
        self.0
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
            .collect()
    }
}

/// A number sent either as a JSON number or as a numeric string.
/// Any other JSON value is kept so the handler can reject it.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Numeric {
    Number(serde_json::Number),
    Text(String),
    Other(Value),
}

impl Numeric {
    /// Integer value, fractions are truncated toward zero.
    pub fn as_i64(&self) -> Option<i64> {
        let float = match self {
            Self::Number(n) => match n.as_i64() {
                Some(i) => return Some(i),
                None => n.as_f64()?,
            },
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
            Self::Other(_) => return None,
        };
        float.is_finite().then(|| float.trunc() as i64)
    }
}

/// A parameter that may have been sent once or several times.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
    Other(Value),
}

impl OneOrMany {
    /// Values to check against the city whitelist. A value that is not a
    /// string is passed on as its JSON text, which never names a city.
    pub fn into_values(self) -> Vec<String> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
            Self::Other(value) => vec![value.to_string()],
        }
    }
}

/// Body of `POST /measurements_post`.
#[derive(Clone, Debug, Deserialize)]
pub struct NewMeasurementRequest {
    pub location: Option<OneOrMany>,
    #[serde(rename = "CO2")]
    pub co2: Option<Numeric>,
    #[serde(rename = "PM25")]
    pub pm25: Option<Numeric>,
    pub temperature: Option<Numeric>,
    pub humidity: Option<Numeric>,
}

/// The four metrics of a new measurement, all required.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Metrics {
    pub co2: i64,
    pub pm25: i64,
    pub temperature: i64,
    pub humidity: i64,
}

impl NewMeasurementRequest {
    /// Location values as sent, empty when missing.
    pub fn location_values(&self) -> Vec<String> {
        self.location
            .clone()
            .map(OneOrMany::into_values)
            .unwrap_or_default()
    }

    /// All metrics, `None` if any of them is missing or not a number.
    pub fn metrics(&self) -> Option<Metrics> {
        let value = |n: &Option<Numeric>| n.as_ref().and_then(Numeric::as_i64);
        Some(Metrics {
            co2: value(&self.co2)?,
            pm25: value(&self.pm25)?,
            temperature: value(&self.temperature)?,
            humidity: value(&self.humidity)?,
        })
    }
}

/// Body of `PUT /measurements_put`.
#[derive(Clone, Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_has_changes"))]
pub struct UpdateMeasurementRequest {
    #[validate(required(message = "ID is required"))]
    pub id: Option<Numeric>,
    #[serde(rename = "CO2")]
    pub co2: Option<Numeric>,
    #[serde(rename = "PM25")]
    pub pm25: Option<Numeric>,
    pub temperature: Option<Numeric>,
    pub humidity: Option<Numeric>,
}

/// At least one metric must be present to update.
fn validate_has_changes(request: &UpdateMeasurementRequest) -> Result<(), ValidationError> {
    let fields = [
        &request.co2,
        &request.pm25,
        &request.temperature,
        &request.humidity,
    ];
    if fields.iter().any(|f| f.is_some()) {
        Ok(())
    } else {
        Err(ValidationError::new("no_changes").with_message(Cow::Borrowed(
            "At least one field must be provided to update",
        )))
    }
}

/// Field values of an update request that are not numbers.
#[derive(Debug, PartialEq, Eq)]
pub struct NotANumber(pub &'static str);

impl UpdateMeasurementRequest {
    /// Id of the measurement to update.
    pub fn measurement_id(&self) -> Result<MeasurementId, NotANumber> {
        self.id
            .as_ref()
            .and_then(Numeric::as_i64)
            .map(MeasurementId)
            .ok_or(NotANumber("id"))
    }

    /// Only the fields that were sent.
    pub fn changes(&self) -> Result<MeasurementChanges, NotANumber> {
        let field = |value: &Option<Numeric>, name: &'static str| match value {
            None => Ok(None),
            Some(n) => n.as_i64().map(Some).ok_or(NotANumber(name)),
        };
        Ok(MeasurementChanges {
            co2: field(&self.co2, "CO2")?,
            pm25: field(&self.pm25, "PM25")?,
            temperature: field(&self.temperature, "temperature")?,
            humidity: field(&self.humidity, "humidity")?,
        })
    }
}
