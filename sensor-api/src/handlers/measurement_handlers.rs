//! Route handlers for the measurement API.
use crate::{
    extractors::validator::{JsonBody, ValidatingJson},
    types::{
        handler::{ApiResponse, Database, HandlerError, HandlerResult},
        request::{NewMeasurementRequest, NotANumber, QueryParams, UpdateMeasurementRequest},
        response::{CityMeasurement, CityMeasurements, MeasurementUpdate, UpdatedMeasurement},
    },
};
use sensor_database::{
    database::MeasurementDatabase,
    time::now_timestamp,
    types::NewMeasurement,
    validation::{optional_date_range, validate_location},
};
use tracing::debug;

const LOCATION: &str = "location";
const START_DATE: &str = "startDate";
const END_DATE: &str = "endDate";

const FETCH_FAILED: &str = "Could not fetch the measurements.";
const FETCH_ONE_FAILED: &str = "Could not fetch the measurement.";
const INSERT_FAILED: &str = "Could not insert the measurement.";
const DELETE_FAILED: &str = "Could not delete the measurements.";
const UPDATE_FAILED: &str = "Could not update the measurement.";

const NOT_FOUND: &str = "Measurement with given ID not found";

impl From<NotANumber> for HandlerError {
    fn from(NotANumber(field): NotANumber) -> Self {
        match field {
            "id" => HandlerError::BadRequest("ID must be a number".to_owned()),
            _ => HandlerError::BadRequest("All fields must be numbers".to_owned()),
        }
    }
}

/// Get measurements handler.
pub async fn get_measurements<D>(
    db: Database<D>,
    params: QueryParams,
) -> HandlerResult<ApiResponse<CityMeasurements>>
where
    D: MeasurementDatabase + 'static,
{
    let location = validate_location(&params.values(LOCATION))?;
    let range = optional_date_range(&params.values(START_DATE), &params.values(END_DATE))?;

    let (measurements, message) = match range {
        None => (
            db.measurements_by_city(location)
                .await
                .map_err(HandlerError::internal(FETCH_FAILED))?,
            "Measurements fetched by location",
        ),
        Some(range) => (
            db.measurements_in_range(location, &range)
                .await
                .map_err(HandlerError::internal(FETCH_FAILED))?,
            "Measurements fetched by location and date range",
        ),
    };
    debug!("fetched {} measurements for {location}", measurements.len());

    Ok(ApiResponse::ok(
        message,
        CityMeasurements {
            location,
            measurements,
        },
    ))
}

/// Save measurement handler.
pub async fn save_measurement<D>(
    db: Database<D>,
    JsonBody(request): JsonBody<NewMeasurementRequest>,
) -> HandlerResult<ApiResponse<CityMeasurement>>
where
    D: MeasurementDatabase + 'static,
{
    let location = validate_location(&request.location_values())?;
    let metrics = request
        .metrics()
        .ok_or_else(|| HandlerError::BadRequest("All fields must be numbers".to_owned()))?;

    let new_measurement = NewMeasurement {
        city: location,
        co2: metrics.co2,
        pm25: metrics.pm25,
        temperature: metrics.temperature,
        humidity: metrics.humidity,
        timestamp: now_timestamp(),
    };

    let measurement = db
        .insert_measurement(&new_measurement)
        .await
        .map_err(HandlerError::internal(INSERT_FAILED))?;
    debug!("saved measurement: {measurement}");

    Ok(ApiResponse::ok(
        "Measurement added successfully",
        CityMeasurement {
            location,
            measurement,
        },
    ))
}

/// Delete measurements handler.
pub async fn delete_measurements<D>(
    db: Database<D>,
    params: QueryParams,
) -> HandlerResult<ApiResponse<CityMeasurements>>
where
    D: MeasurementDatabase + 'static,
{
    let location = validate_location(&params.values(LOCATION))?;
    let range = optional_date_range(&params.values(START_DATE), &params.values(END_DATE))?;

    let (measurements, message) = match range {
        None => (
            db.delete_by_city(location)
                .await
                .map_err(HandlerError::internal(DELETE_FAILED))?,
            "All measurements deleted",
        ),
        Some(range) => (
            db.delete_in_range(location, &range)
                .await
                .map_err(HandlerError::internal(DELETE_FAILED))?,
            "Measurements deleted successfully",
        ),
    };
    debug!("deleted {} measurements for {location}", measurements.len());

    let message = if measurements.is_empty() {
        "There werent any to delete"
    } else {
        message
    };

    Ok(ApiResponse::ok(
        message,
        CityMeasurements {
            location,
            measurements,
        },
    ))
}

/// Update measurement handler.
pub async fn update_measurement<D>(
    db: Database<D>,
    ValidatingJson(request): ValidatingJson<UpdateMeasurementRequest>,
) -> HandlerResult<ApiResponse<UpdatedMeasurement>>
where
    D: MeasurementDatabase + 'static,
{
    let id = request.measurement_id()?;
    let changes = request.changes()?;
    debug!("updating measurement {id} with {changes}");

    let old = db
        .measurement_by_id(id)
        .await
        .map_err(HandlerError::internal(FETCH_ONE_FAILED))?
        .ok_or_else(|| HandlerError::NotFound(NOT_FOUND.to_owned()))?;

    // The row can disappear between the lookup and the write.
    let new = db
        .update_measurement(id, &changes)
        .await
        .map_err(HandlerError::internal(UPDATE_FAILED))?
        .ok_or_else(|| HandlerError::NotFound(NOT_FOUND.to_owned()))?;

    Ok(ApiResponse::ok(
        "Measurement updated successfully",
        UpdatedMeasurement {
            location: old.city,
            measurement: MeasurementUpdate { old, new },
        },
    ))
}
