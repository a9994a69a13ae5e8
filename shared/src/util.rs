//! Date helpers shared by server and client

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

use crate::error::{AppError, AppResult, ErrorCode};

/// Wire format for every calendar date in the API
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// ISO local datetimes without an offset; `%.f` also matches no fraction
const LOCAL_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|_| {
        AppError::with_message(
            ErrorCode::InvalidFormat,
            format!("Invalid date format: {}", date),
        )
        .with_detail("value", date)
    })
}

/// Reduce a submitted `served_on` to a calendar date.
///
/// Accepts a plain `YYYY-MM-DD` date, a local ISO datetime without an
/// offset (its date part is kept), or an RFC 3339 timestamp, which is
/// converted to the server's local date first (a date picker sending
/// local midnight as UTC must not slip to the previous day).
pub fn normalize_served_on(raw: &str) -> AppResult<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Ok(date);
    }
    if let Some(local) = LOCAL_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Ok(local.date());
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Local).date_naive())
        .map_err(|_| {
            AppError::new(ErrorCode::InvalidServedOn).with_detail("served_on", raw.to_string())
        })
}

/// Format a date for the wire
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-03-04").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
        );
        let err = parse_date("03/04/2024").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
    }

    #[test]
    fn test_normalize_plain_date() {
        assert_eq!(
            normalize_served_on(" 2024-01-01 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_normalize_local_datetime_without_offset() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(normalize_served_on("2024-01-01T10:00:00").unwrap(), expected);
        assert_eq!(normalize_served_on("2024-01-01T23:59:59.250").unwrap(), expected);
        assert_eq!(normalize_served_on("2024-01-01T10:00").unwrap(), expected);
    }

    #[test]
    fn test_normalize_timestamp_uses_local_date() {
        let raw = "2024-01-01T12:00:00+00:00";
        let expected = DateTime::parse_from_rfc3339(raw)
            .unwrap()
            .with_timezone(&Local)
            .date_naive();
        assert_eq!(normalize_served_on(raw).unwrap(), expected);
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        let err = normalize_served_on("next tuesday").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidServedOn);
        assert_eq!(err.http_status(), http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 9).unwrap();
        assert_eq!(format_date(date), "2024-12-09");
    }
}
