use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use thiserror::Error;

/// Two-digit years below this map to 20xx, the rest to 19xx
const CENTURY_PIVOT: i32 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventDateError {
    #[error("Date is required.")]
    Missing,

    #[error("Invalid date '{0}', expected DD-MM-YY.")]
    Malformed(String),
}

/// Parses a calendar date written as `DD-MM-YY` into UTC midnight of that day
///
/// # Arguments
/// * `input` - The date text, e.g. `"05-01-25"`
///
/// # Returns
/// The instant at 00:00:00 UTC, or an error for empty, malformed or impossible dates
pub fn parse_event_date(input: &str) -> Result<DateTime<Utc>, EventDateError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(EventDateError::Missing);
    }

    let malformed = || EventDateError::Malformed(trimmed.to_string());

    let parts: Vec<&str> = trimmed.split('-').collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(malformed());
    };

    let day: u32 = parse_digits(day, 2).ok_or_else(malformed)?;
    let month: u32 = parse_digits(month, 2).ok_or_else(malformed)?;
    let year: i32 = parse_digits(year, 2).ok_or_else(malformed)?;

    let full_year = if year < CENTURY_PIVOT {
        2000 + year
    } else {
        1900 + year
    };

    NaiveDate::from_ymd_opt(full_year, month, day)
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .ok_or_else(malformed)
}

/// Parses a date supplied by an API client
///
/// Accepts `DD-MM-YY`, `YYYY-MM-DD` (UTC midnight) and RFC 3339 timestamps.
pub fn parse_any_date(input: &str) -> Result<DateTime<Utc>, EventDateError> {
    let trimmed = input.trim();

    match parse_event_date(trimmed) {
        Err(EventDateError::Malformed(_)) => {}
        other => return other,
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| EventDateError::Malformed(trimmed.to_string()))
}

/// Half-open bounds `[start, end)` of the UTC calendar day containing `instant`
///
/// The two bounds are computed as separate values, `end` being exactly one day after `start`.
pub fn day_bounds(instant: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = instant.date_naive().and_time(NaiveTime::MIN).and_utc();
    let end = start + Duration::days(1);

    (start, end)
}

/// Moves an event date forward by one calendar day
pub fn next_day(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant + Duration::days(1)
}

fn parse_digits<T: std::str::FromStr>(s: &str, max_len: usize) -> Option<T> {
    if s.is_empty() || s.len() > max_len || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike};

    #[test]
    fn test_parse_event_date() {
        let date = parse_event_date("05-01-25").unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2025, 1, 5, 0, 0, 0).unwrap());

        let date = parse_event_date(" 5-1-25 ").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2025, 1, 5));
    }

    #[test]
    fn test_century_pivot() {
        assert_eq!(parse_event_date("01-06-49").unwrap().year(), 2049);
        assert_eq!(parse_event_date("01-06-50").unwrap().year(), 1950);
        assert_eq!(parse_event_date("01-06-99").unwrap().year(), 1999);
        assert_eq!(parse_event_date("01-06-00").unwrap().year(), 2000);
    }

    #[test]
    fn test_parse_event_date_rejects_garbage() {
        assert_eq!(parse_event_date(""), Err(EventDateError::Missing));
        assert!(matches!(
            parse_event_date("2025-01-05"),
            Err(EventDateError::Malformed(_))
        ));
        assert!(parse_event_date("05/01/25").is_err());
        assert!(parse_event_date("aa-01-25").is_err());
        assert!(parse_event_date("05-01").is_err());
        assert!(parse_event_date("31-02-24").is_err());
        assert!(parse_event_date("05-13-24").is_err());
    }

    #[test]
    fn test_parse_any_date() {
        let expected = Utc.with_ymd_and_hms(2025, 1, 5, 0, 0, 0).unwrap();
        assert_eq!(parse_any_date("05-01-25").unwrap(), expected);
        assert_eq!(parse_any_date("2025-01-05").unwrap(), expected);
        assert_eq!(
            parse_any_date("2025-01-05T05:30:00+05:30").unwrap(),
            expected
        );
        assert!(parse_any_date("next tuesday").is_err());
        assert_eq!(parse_any_date("  "), Err(EventDateError::Missing));
    }

    #[test]
    fn test_day_bounds_are_distinct() {
        let noon = Utc.with_ymd_and_hms(2025, 1, 5, 12, 34, 56).unwrap();
        let (start, end) = day_bounds(noon);

        assert_eq!(start, Utc.with_ymd_and_hms(2025, 1, 5, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 1, 6, 0, 0, 0).unwrap());
        assert!(start < end);

        let last_second = Utc.with_ymd_and_hms(2025, 1, 5, 23, 59, 59).unwrap();
        assert!(last_second >= start && last_second < end);
    }

    #[test]
    fn test_next_day_crosses_month_and_year() {
        let eve = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();
        let shifted = next_day(eve);

        assert_eq!((shifted.year(), shifted.month(), shifted.day()), (2025, 1, 1));
        assert_eq!(shifted.hour(), 0);
    }
}
