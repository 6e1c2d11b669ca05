//! In process measurement storage, grouped by city.
use crate::{
    database::{DatabaseError, DatabaseResult, MeasurementDatabase},
    types::{City, DateRange, Measurement, MeasurementChanges, MeasurementId, NewMeasurement},
    DATABASE_TARGET,
};
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicI64, Ordering},
        RwLock, RwLockReadGuard, RwLockWriteGuard,
    },
};
use tracing::debug;

type CityMeasurements = HashMap<City, Vec<Measurement>>;

/// An implementation of MeasurementDatabase that keeps everything in memory.
/// Ids come from a process local counter and are never reused.
#[derive(Debug, Default)]
pub struct MemoryDatabase {
    measurements: RwLock<CityMeasurements>,
    next_id: AtomicI64,
}

impl MemoryDatabase {
    fn read(&self) -> DatabaseResult<RwLockReadGuard<'_, CityMeasurements>> {
        self.measurements.read().map_err(|_| DatabaseError::Poisoned)
    }

    fn write(&self) -> DatabaseResult<RwLockWriteGuard<'_, CityMeasurements>> {
        self.measurements.write().map_err(|_| DatabaseError::Poisoned)
    }

    fn assign_id(&self) -> MeasurementId {
        MeasurementId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Select measurements of a city matching `keep`.
    fn select(
        &self,
        city: City,
        keep: impl Fn(&Measurement) -> bool,
    ) -> DatabaseResult<Vec<Measurement>> {
        Ok(self
            .read()?
            .get(&city)
            .map(|list| list.iter().filter(|m| keep(m)).cloned().collect())
            .unwrap_or_default())
    }

    /// Remove measurements of a city matching `remove` and return them.
    /// A city without measurements left is dropped from the map.
    fn remove(
        &self,
        city: City,
        remove: impl Fn(&Measurement) -> bool,
    ) -> DatabaseResult<Vec<Measurement>> {
        let mut guard = self.write()?;
        let Some(list) = guard.get_mut(&city) else {
            return Ok(Vec::new());
        };

        let (removed, kept): (Vec<_>, Vec<_>) = list.drain(..).partition(|m| remove(m));
        *list = kept;
        if list.is_empty() {
            guard.remove(&city);
        }
        debug!(target: DATABASE_TARGET, "removed {} measurements for {city}", removed.len());
        Ok(removed)
    }
}

impl FromIterator<NewMeasurement> for MemoryDatabase {
    fn from_iter<I: IntoIterator<Item = NewMeasurement>>(iter: I) -> Self {
        let database = MemoryDatabase::default();
        let mut map = CityMeasurements::new();
        for measurement in iter {
            let city = measurement.city;
            map.entry(city)
                .or_default()
                .push(measurement.with_id(database.assign_id()));
        }
        Self {
            measurements: RwLock::new(map),
            ..database
        }
    }
}

impl MeasurementDatabase for MemoryDatabase {
    async fn insert_measurement(&self, measurement: &NewMeasurement) -> DatabaseResult<Measurement> {
        let mut guard = self.write()?;
        let saved = measurement.clone().with_id(self.assign_id());
        guard.entry(saved.city).or_default().push(saved.clone());
        Ok(saved)
    }

    async fn measurements_by_city(&self, city: City) -> DatabaseResult<Vec<Measurement>> {
        self.select(city, |_| true)
    }

    async fn measurements_in_range(
        &self,
        city: City,
        range: &DateRange,
    ) -> DatabaseResult<Vec<Measurement>> {
        self.select(city, |m| range.contains(m.timestamp))
    }

    async fn delete_by_city(&self, city: City) -> DatabaseResult<Vec<Measurement>> {
        self.remove(city, |_| true)
    }

    async fn delete_in_range(
        &self,
        city: City,
        range: &DateRange,
    ) -> DatabaseResult<Vec<Measurement>> {
        self.remove(city, |m| range.contains(m.timestamp))
    }

    async fn update_measurement(
        &self,
        id: MeasurementId,
        changes: &MeasurementChanges,
    ) -> DatabaseResult<Option<Measurement>> {
        let mut guard = self.write()?;
        let updated = guard
            .values_mut()
            .flat_map(|list| list.iter_mut())
            .find(|m| m.id == id)
            .map(|m| {
                *m = m.with_changes(changes);
                m.clone()
            });
        Ok(updated)
    }

    async fn measurement_by_id(&self, id: MeasurementId) -> DatabaseResult<Option<Measurement>> {
        Ok(self
            .read()?
            .values()
            .flat_map(|list| list.iter())
            .find(|m| m.id == id)
            .cloned())
    }
}
