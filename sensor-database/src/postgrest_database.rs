//! This module provides data access to a measurements table served over PostgREST.
use crate::{
    database::{DatabaseError, DatabaseResult, MeasurementDatabase},
    types::{City, DateRange, Measurement, MeasurementChanges, MeasurementId, NewMeasurement},
    PostgrestArgs, DATABASE_TARGET,
};
use postgrest::{Builder, Postgrest};
use std::fmt;
use tracing::{debug, instrument};

/// An implementation of MeasurementDatabase for a PostgREST table.
pub struct PostgrestDatabase {
    client: Postgrest,
    url: String,
    table: String,
}

impl fmt::Debug for PostgrestDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgrestDatabase")
            .field("url", &self.url)
            .field("table", &self.table)
            .finish()
    }
}

impl PostgrestDatabase {
    /// Creates a new PostgrestDatabase API.
    pub fn new(url: &str, key: &str, table: &str) -> Self {
        let client = Postgrest::new(url)
            .insert_header("apikey", key)
            .insert_header("Authorization", format!("Bearer {key}"));

        Self {
            client,
            url: url.to_owned(),
            table: table.to_owned(),
        }
    }

    /// Connect with command line options. `None` when no url is configured.
    pub fn from_args(options: &PostgrestArgs) -> Option<Self> {
        match (&options.supabase_url, &options.supabase_key) {
            (Some(url), Some(key)) => Some(Self::new(url, key, &options.table_name)),
            _ => None,
        }
    }

    /// Query builder for the measurements table.
    fn table(&self) -> Builder {
        self.client.from(&self.table)
    }

    /// Query builder filtered to a city.
    fn city(&self, builder: Builder, city: City) -> Builder {
        builder.eq("city", city.as_str())
    }

    /// Narrow a query to the inclusive `range`.
    fn in_range(&self, builder: Builder, range: &DateRange) -> Builder {
        builder
            .gte("timestamp", range.start.to_string())
            .lte("timestamp", range.end.to_string())
    }
}

/// Run the request and decode the returned rows ordered by id.
async fn fetch_rows(builder: Builder) -> DatabaseResult<Vec<Measurement>> {
    let response = builder
        .execute()
        .await
        .map_err(|e| DatabaseError::Request(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| DatabaseError::Request(e.to_string()))?;

    if !status.is_success() {
        return Err(DatabaseError::Rejected {
            status: status.as_u16(),
            body,
        });
    }

    let mut rows = serde_json::from_str::<Vec<Measurement>>(&body)?;
    rows.sort_by_key(|m| m.id);
    debug!(target: DATABASE_TARGET, "postgrest returned {} rows", rows.len());
    Ok(rows)
}

impl MeasurementDatabase for PostgrestDatabase {
    #[instrument(skip_all, level = "debug", target = "database", name = "insert-span")]
    async fn insert_measurement(&self, measurement: &NewMeasurement) -> DatabaseResult<Measurement> {
        let body = serde_json::to_string(&[measurement])?;
        fetch_rows(self.table().insert(body))
            .await?
            .into_iter()
            .next()
            .ok_or(DatabaseError::NothingInserted)
    }

    async fn measurements_by_city(&self, city: City) -> DatabaseResult<Vec<Measurement>> {
        fetch_rows(self.city(self.table().select("*"), city).order("id.asc")).await
    }

    #[instrument(skip_all, level = "debug", target = "database", name = "range-span")]
    async fn measurements_in_range(
        &self,
        city: City,
        range: &DateRange,
    ) -> DatabaseResult<Vec<Measurement>> {
        let query = self.in_range(self.city(self.table().select("*"), city), range);
        fetch_rows(query.order("id.asc")).await
    }

    // A single DELETE with return=representation hands back the removed rows,
    // there is no window between selecting and deleting.
    async fn delete_by_city(&self, city: City) -> DatabaseResult<Vec<Measurement>> {
        fetch_rows(self.city(self.table().delete(), city)).await
    }

    async fn delete_in_range(
        &self,
        city: City,
        range: &DateRange,
    ) -> DatabaseResult<Vec<Measurement>> {
        fetch_rows(self.in_range(self.city(self.table().delete(), city), range)).await
    }

    async fn update_measurement(
        &self,
        id: MeasurementId,
        changes: &MeasurementChanges,
    ) -> DatabaseResult<Option<Measurement>> {
        let body = serde_json::to_string(changes)?;
        debug!(target: DATABASE_TARGET, "update {id} with {body}");
        let rows = fetch_rows(self.table().eq("id", id.to_string()).update(body)).await?;
        Ok(rows.into_iter().next())
    }

    async fn measurement_by_id(&self, id: MeasurementId) -> DatabaseResult<Option<Measurement>> {
        let rows = fetch_rows(self.table().select("*").eq("id", id.to_string())).await?;
        Ok(rows.into_iter().next())
    }
}
