//! Timestamp helpers
//!
//! CoinEx reports `created_at`/`updated_at` as Unix milliseconds while the
//! signing timestamp is also milliseconds. These helpers render them for
//! display.

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::error::TypesError;

/// Display format used by [`timestamp_to_strdatetime`]
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a Unix timestamp (seconds) as `YYYY-MM-DD HH:MM:SS` in local time
pub fn timestamp_to_strdatetime(timestamp: i64) -> Result<String, TypesError> {
    let dt = Local
        .timestamp_opt(timestamp, 0)
        .single()
        .ok_or(TypesError::TimestampOutOfRange(timestamp))?;
    Ok(dt.format(DATETIME_FORMAT).to_string())
}

/// Render a Unix timestamp (seconds) as `YYYY-MM-DD HH:MM:SS` in UTC
pub fn timestamp_to_utc_strdatetime(timestamp: i64) -> Result<String, TypesError> {
    let dt = DateTime::<Utc>::from_timestamp(timestamp, 0)
        .ok_or(TypesError::TimestampOutOfRange(timestamp))?;
    Ok(dt.format(DATETIME_FORMAT).to_string())
}

/// Convert Unix milliseconds (as found in API responses) to a UTC datetime
pub fn millis_to_datetime(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(millis)
}
