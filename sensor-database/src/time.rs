//! Timestamps in the timezone the sensors report in.
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Timezone used to stamp measurements and to interpret calendar dates.
pub const TIMEZONE: Tz = chrono_tz::Europe::Bucharest;

/// Current time as epoch seconds.
pub fn now_timestamp() -> i64 {
    Utc::now().with_timezone(&TIMEZONE).timestamp()
}

/// First second of `date` in [`TIMEZONE`].
pub fn start_of_day(date: NaiveDate) -> Option<i64> {
    TIMEZONE
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .map(|t| t.timestamp())
}

/// Last second of `date` in [`TIMEZONE`].
pub fn end_of_day(date: NaiveDate) -> Option<i64> {
    let last_second = NaiveTime::from_hms_opt(23, 59, 59)?;
    TIMEZONE
        .from_local_datetime(&date.and_time(last_second))
        .latest()
        .map(|t| t.timestamp())
}
