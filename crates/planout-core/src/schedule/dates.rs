//! Calendar date helpers shared by the interfaces.

use jiff::{Timestamp, Zoned, civil, tz::TimeZone};

use crate::error::{PlannerError, Result};

/// Today's date in the system time zone.
pub fn today() -> civil::Date {
    Zoned::now().date()
}

/// Parses `YYYY-MM-DD`, a civil datetime, or an RFC 3339 timestamp into a
/// date. Timestamps resolve to their UTC date.
pub fn parse_date_lenient(raw: &str) -> Option<civil::Date> {
    let raw = raw.trim();
    if let Ok(date) = raw.parse::<civil::Date>() {
        return Some(date);
    }
    if let Ok(datetime) = raw.parse::<civil::DateTime>() {
        return Some(datetime.date());
    }
    raw.parse::<Timestamp>()
        .ok()
        .map(|ts| ts.to_zoned(TimeZone::UTC).date())
}

/// Like [`parse_date_lenient`] but reports unparseable input as invalid
/// input for `field`.
pub fn parse_date(field: &str, raw: &str) -> Result<civil::Date> {
    parse_date_lenient(raw).ok_or_else(|| {
        PlannerError::invalid_input(field)
            .with_reason(format!("'{raw}' is not a date (expected YYYY-MM-DD)"))
    })
}
