//! Parsing of the `release_date` field accepted by the movie endpoints.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::CoreError;
use crate::types::ReleaseDate;

/// Parse a release date from any of the accepted textual forms.
///
/// Accepted, in order:
/// - `YYYY-MM-DD` (midnight is assumed)
/// - `YYYY-MM-DDTHH:MM:SS[.fff]`
/// - `YYYY-MM-DD HH:MM:SS`
/// - RFC 3339 with an offset (converted to UTC)
/// - RFC 2822 / HTTP-date, e.g. `Fri, 19 Dec 1997 00:00:00 GMT`
pub fn parse_release_date(input: &str) -> Result<ReleaseDate, CoreError> {
    let trimmed = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    if let Ok(dt) = trimmed.parse::<NaiveDateTime>() {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Ok(dt.naive_utc());
    }

    Err(CoreError::Validation(format!(
        "Invalid release_date '{input}'. Expected a date such as 2022-01-15"
    )))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn plain_date_is_midnight() {
        let dt = parse_release_date("2022-01-15").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2022, 1, 15));
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn iso_datetime() {
        let dt = parse_release_date("1997-12-19T20:30:00").unwrap();
        assert_eq!(dt.hour(), 20);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn space_separated_datetime() {
        let dt = parse_release_date("2009-12-18 08:00:00").unwrap();
        assert_eq!(dt.day(), 18);
        assert_eq!(dt.hour(), 8);
    }

    #[test]
    fn rfc3339_is_converted_to_utc() {
        let dt = parse_release_date("2009-12-18T02:00:00+02:00").unwrap();
        assert_eq!(dt.day(), 18);
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn http_date() {
        let dt = parse_release_date("Fri, 19 Dec 1997 00:00:00 GMT").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (1997, 12, 19));
    }

    #[test]
    fn garbage_is_rejected() {
        assert_matches!(parse_release_date("next tuesday"), Err(CoreError::Validation(_)));
        assert_matches!(parse_release_date("2022-13-45"), Err(CoreError::Validation(_)));
        assert_matches!(parse_release_date(""), Err(CoreError::Validation(_)));
    }
}
