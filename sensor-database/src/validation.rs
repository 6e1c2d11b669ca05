//! Request parameter validation shared by every route.
use crate::{
    time::{end_of_day, start_of_day},
    types::{City, DateRange},
};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

/// Reasons a location or date range was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("Location is required")]
    MissingLocation,
    #[error("Only one location parameter!")]
    MultipleLocations,
    #[error("Location not known")]
    UnknownLocation,
    #[error("Both start and end dates are required")]
    MissingDates,
    #[error("Only one for startDate or endDate!")]
    MultipleDates,
    #[error("Start date must be in format D.M.YYYY or DD.MM.YYYY")]
    StartDateFormat,
    #[error("End date must be in format D.M.YYYY or DD.MM.YYYY")]
    EndDateFormat,
    #[error("Dates must be in format DD.MM.YYYY")]
    NotACalendarDate,
    #[error("Start date must be earlier than end date")]
    InvertedRange,
}

impl InvalidInput {
    /// The input was well formed but names something that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UnknownLocation)
    }
}

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([1-9]|0[1-9]|[12][0-9]|3[01])\.([1-9]|0[1-9]|1[0-2])\.(\d{4})$").unwrap()
});

/// Drop empty values, an empty parameter counts as not given.
fn present(values: &[String]) -> Vec<&str> {
    values
        .iter()
        .map(String::as_str)
        .filter(|v| !v.is_empty())
        .collect()
}

/// Check a location parameter against the city whitelist.
pub fn validate_location(values: &[String]) -> Result<City, InvalidInput> {
    match present(values).as_slice() {
        [] => Err(InvalidInput::MissingLocation),
        [location] => location
            .parse::<City>()
            .map_err(|_| InvalidInput::UnknownLocation),
        _ => Err(InvalidInput::MultipleLocations),
    }
}

/// Parse `D.M.YYYY` into a calendar date. The outer `None` means the text
/// does not have the date shape, the inner one that the date does not exist.
fn parse_date(value: &str) -> Option<Option<NaiveDate>> {
    let captures = DATE_RE.captures(value)?;
    let number = |i: usize| captures.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
    let date = match (number(1), number(2), captures.get(3)) {
        (Some(day), Some(month), Some(year)) => year
            .as_str()
            .parse::<i32>()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, month, day)),
        _ => None,
    };
    Some(date)
}

/// Validate a start and end date pair into an inclusive range covering
/// both days completely.
pub fn validate_date_range(start: &[String], end: &[String]) -> Result<DateRange, InvalidInput> {
    let (start, end) = match (present(start).as_slice(), present(end).as_slice()) {
        ([], _) | (_, []) => return Err(InvalidInput::MissingDates),
        ([start], [end]) => (*start, *end),
        _ => return Err(InvalidInput::MultipleDates),
    };

    let start_date = parse_date(start).ok_or(InvalidInput::StartDateFormat)?;
    let end_date = parse_date(end).ok_or(InvalidInput::EndDateFormat)?;

    let (Some(start_date), Some(end_date)) = (start_date, end_date) else {
        return Err(InvalidInput::NotACalendarDate);
    };

    if start_date > end_date {
        return Err(InvalidInput::InvertedRange);
    }

    let range = match (start_of_day(start_date), end_of_day(end_date)) {
        (Some(start), Some(end)) => DateRange { start, end },
        _ => return Err(InvalidInput::NotACalendarDate),
    };
    debug!("date range {start} - {end} resolved to {range}");
    Ok(range)
}

/// A date range is only applied when at least one of its ends was given.
pub fn optional_date_range(
    start: &[String],
    end: &[String],
) -> Result<Option<DateRange>, InvalidInput> {
    if present(start).is_empty() && present(end).is_empty() {
        Ok(None)
    } else {
        validate_date_range(start, end).map(Some)
    }
}
