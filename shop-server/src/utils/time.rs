//! Time helpers - sale timestamps and the business time zone
//!
//! Sales dates arrive as text in several shapes. Offset-bearing values are
//! converted to the business time zone before taking the calendar date;
//! naive values and plain dates are already local.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use chrono_tz::Tz;
use thiserror::Error;

/// Offset-bearing formats besides RFC 3339 (Postgres `timestamptz` text)
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

/// Wall-clock formats without offset
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("empty sale_date")]
    Empty,
    #[error("unrecognized sale_date format")]
    Unrecognized,
}

/// Calendar date of a sale in the business time zone
pub fn sale_local_date(raw: &str, tz: Tz) -> Result<NaiveDate, TimestampError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(TimestampError::Empty);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&tz).date_naive());
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Ok(dt.with_timezone(&tz).date_naive());
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt.date());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| TimestampError::Unrecognized)
}

/// Current instant as stored on new sales (`2024-03-01T10:15:00.000Z`)
pub fn now_sale_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
