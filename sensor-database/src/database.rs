//! Generic MeasurementDatabase trait and types.
use crate::types::{City, DateRange, Measurement, MeasurementChanges, MeasurementId, NewMeasurement};
use std::{fmt::Debug, future::Future};
use thiserror::Error;

/// Type alias for sensor-database Result.
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Abstract our database API so it can be swapped out
/// for any backend. Every select returns rows ordered by id.
pub trait MeasurementDatabase: Send + Sync + Debug {
    /// Save a new measurement and return it with its assigned id.
    fn insert_measurement(
        &self,
        measurement: &NewMeasurement,
    ) -> impl Future<Output = DatabaseResult<Measurement>> + Send;
    /// All measurements for a city.
    fn measurements_by_city(
        &self,
        city: City,
    ) -> impl Future<Output = DatabaseResult<Vec<Measurement>>> + Send;
    /// Measurements for a city with a timestamp inside `range`.
    fn measurements_in_range(
        &self,
        city: City,
        range: &DateRange,
    ) -> impl Future<Output = DatabaseResult<Vec<Measurement>>> + Send;
    /// Remove every measurement of a city, returning the removed rows.
    fn delete_by_city(
        &self,
        city: City,
    ) -> impl Future<Output = DatabaseResult<Vec<Measurement>>> + Send;
    /// Remove the measurements of a city inside `range`, returning the removed rows.
    fn delete_in_range(
        &self,
        city: City,
        range: &DateRange,
    ) -> impl Future<Output = DatabaseResult<Vec<Measurement>>> + Send;
    /// Write the set fields of `changes`. `None` when no row has that id.
    fn update_measurement(
        &self,
        id: MeasurementId,
        changes: &MeasurementChanges,
    ) -> impl Future<Output = DatabaseResult<Option<Measurement>>> + Send;
    /// Lookup a single measurement.
    fn measurement_by_id(
        &self,
        id: MeasurementId,
    ) -> impl Future<Output = DatabaseResult<Option<Measurement>>> + Send;
}

/// Database errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Postgrest request failed: `{0}`")]
    Request(String),
    #[error("Postgrest responded with status {status}: `{body}`")]
    Rejected { status: u16, body: String },
    #[error("Insert returned no rows")]
    NothingInserted,
    #[error("Json error: `{0}`")]
    Json(#[from] serde_json::Error),
    #[error("Measurement store lock was poisoned")]
    Poisoned,
    #[error("Database Test Failure")]
    TestError,
}
