//! ISO-8601 timestamp handling for stored records.
//!
//! Clients send whatever their platform's ISO formatter produces: full RFC 3339
//! with `Z` or a numeric offset, naive date-times, or bare dates. Naive values are
//! read as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use crate::error::{EngineError, EngineResult};

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"];

/// ## Summary
/// Parses an ISO-8601 timestamp into UTC.
///
/// ## Errors
/// Returns `InvalidTimestamp` naming `field` if no supported form matches.
pub fn parse_timestamp(field: &'static str, value: &str) -> EngineResult<DateTime<Utc>> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }

    Err(EngineError::InvalidTimestamp {
        field,
        value: value.to_string(),
    })
}

/// ## Summary
/// Parses an optional timestamp, treating blank strings as absent.
///
/// ## Errors
/// Returns `InvalidTimestamp` if a non-blank value does not parse.
pub fn parse_optional_timestamp(
    field: &'static str,
    value: Option<&str>,
) -> EngineResult<Option<DateTime<Utc>>> {
    match value {
        Some(text) if !text.trim().is_empty() => parse_timestamp(field, text).map(Some),
        _ => Ok(None),
    }
}

/// Formats a timestamp the way browsers' `toISOString` does.
#[must_use]
pub fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parses_zulu_and_offsets() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 10, 14, 30, 0).unwrap();
        assert_eq!(
            parse_timestamp("start_date", "2025-03-10T14:30:00.000Z").unwrap(),
            expected
        );
        assert_eq!(
            parse_timestamp("start_date", "2025-03-10T16:30:00+02:00").unwrap(),
            expected
        );
    }

    #[test]
    fn test_parses_naive_forms_as_utc() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 10, 14, 30, 0).unwrap();
        assert_eq!(
            parse_timestamp("start_date", "2025-03-10T14:30:00").unwrap(),
            expected
        );
        assert_eq!(
            parse_timestamp("start_date", "2025-03-10T14:30").unwrap(),
            expected
        );
        assert_eq!(
            parse_timestamp("start_date", "2025-03-10").unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_rejects_garbage() {
        let err = parse_timestamp("end_date", "next tuesday").unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidTimestamp { field: "end_date", .. }
        ));
    }

    #[test]
    fn test_blank_optional_is_none() {
        assert_eq!(parse_optional_timestamp("end_date", Some("  ")).unwrap(), None);
        assert_eq!(parse_optional_timestamp("end_date", None).unwrap(), None);
    }

    #[test]
    fn test_format_matches_browser_iso_strings() {
        let value = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_timestamp(value), "2025-01-02T03:04:05.000Z");
    }
}
