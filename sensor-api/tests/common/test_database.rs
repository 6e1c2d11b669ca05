//! Seeded and failing measurement databases for tests.
use sensor_database::{
    database::{DatabaseError, DatabaseResult, MeasurementDatabase},
    memory_database::MemoryDatabase,
    types::{City, DateRange, Measurement, MeasurementChanges, MeasurementId, NewMeasurement},
};

/// 2025-03-18 00:00:00 in Bucharest.
#[allow(dead_code)]
pub const MARCH_18_2025: i64 = 1_742_248_800;
const DAY: i64 = 86_400;
const NOON: i64 = 12 * 3_600;

/// Create a test measurement.
pub fn test_measurement(city: City, timestamp: i64) -> NewMeasurement {
    NewMeasurement {
        city,
        co2: 400,
        pm25: 12,
        temperature: 21,
        humidity: 40,
        timestamp,
    }
}

/// A database holding:
/// - ids 0 to 3: Iasi at noon on the 17th, 18th, 19th and 20th of March 2025.
/// - id 4: Bacau on the 18th.
/// - id 5: Galati on the 19th.
#[allow(dead_code)]
pub fn seeded_database() -> MemoryDatabase {
    let iasi = (-1..=2).map(|day| test_measurement(City::Iasi, MARCH_18_2025 + day * DAY + NOON));
    iasi.chain([
        test_measurement(City::Bacau, MARCH_18_2025 + NOON),
        test_measurement(City::Galati, MARCH_18_2025 + DAY + NOON),
    ])
    .collect()
}

/// Every call fails like an unreachable datastore.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct FailingDatabase;

impl MeasurementDatabase for FailingDatabase {
    async fn insert_measurement(&self, _: &NewMeasurement) -> DatabaseResult<Measurement> {
        Err(DatabaseError::TestError)
    }

    async fn measurements_by_city(&self, _: City) -> DatabaseResult<Vec<Measurement>> {
        Err(DatabaseError::TestError)
    }

    async fn measurements_in_range(
        &self,
        _: City,
        _: &DateRange,
    ) -> DatabaseResult<Vec<Measurement>> {
        Err(DatabaseError::TestError)
    }

    async fn delete_by_city(&self, _: City) -> DatabaseResult<Vec<Measurement>> {
        Err(DatabaseError::TestError)
    }

    async fn delete_in_range(&self, _: City, _: &DateRange) -> DatabaseResult<Vec<Measurement>> {
        Err(DatabaseError::TestError)
    }

    async fn update_measurement(
        &self,
        _: MeasurementId,
        _: &MeasurementChanges,
    ) -> DatabaseResult<Option<Measurement>> {
        Err(DatabaseError::TestError)
    }

    async fn measurement_by_id(&self, _: MeasurementId) -> DatabaseResult<Option<Measurement>> {
        Err(DatabaseError::TestError)
    }
}
