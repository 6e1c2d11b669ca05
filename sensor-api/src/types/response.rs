//! Payloads returned next to `message` and `status`.
use sensor_database::types::{City, Measurement};
use serde::{Deserialize, Serialize};

/// Measurements of one city.
#[derive(Debug, Serialize, Deserialize)]
pub struct CityMeasurements {
    pub location: City,
    pub measurements: Vec<Measurement>,
}

/// A single measurement of a city.
#[derive(Debug, Serialize, Deserialize)]
pub struct CityMeasurement {
    pub location: City,
    pub measurement: Measurement,
}

/// Stored values before and after an update.
#[derive(Debug, Serialize, Deserialize)]
pub struct MeasurementUpdate {
    pub old: Measurement,
    pub new: Measurement,
}

/// An update applied to a measurement of a city.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdatedMeasurement {
    pub location: City,
    pub measurement: MeasurementUpdate,
}
