//! Timestamp parsing and formatting shared by the entity and the DTOs.
//!
//! # Design
//! Clients send dates in whatever shape a browser `Date` accepts, so
//! `parse_date` is deliberately lenient: RFC 3339, naive date-times (taken as
//! UTC), bare `YYYY-MM-DD` dates (midnight UTC) and epoch milliseconds.
//! Output is always the same fixed shape, `YYYY-MM-DDTHH:MM:SS.mmmZ`, so
//! only years 0000 through 9999 are accepted; anything wider would format
//! with a sign and could not be read back.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::Value;

const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

const MIN_YEAR: i32 = 0;
const MAX_YEAR: i32 = 9999;

/// Format a timestamp with millisecond precision and a `Z` suffix.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a JSON value into a UTC timestamp. Returns `None` for anything that
/// does not describe a valid calendar date/time.
pub fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    let parsed = match value {
        Value::String(raw) => parse_date_str(raw),
        Value::Number(millis) => millis.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }?;
    within_four_digit_years(parsed)
}

pub fn parse_date_str(raw: &str) -> Option<DateTime<Utc>> {
    parse_unbounded(raw).and_then(within_four_digit_years)
}

fn within_four_digit_years(value: DateTime<Utc>) -> Option<DateTime<Utc>> {
    (MIN_YEAR..=MAX_YEAR).contains(&value.year()).then_some(value)
}

fn parse_unbounded(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `#[serde(with = "...")]` adapter for `Option<DateTime<Utc>>` fields that
/// travel as `"...Z"` strings or `null`.
pub mod optional_timestamp {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(timestamp) => serializer.serialize_str(&super::format_timestamp(timestamp)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| {
            super::parse_date_str(&s)
                .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {s}")))
        })
        .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn date_only_is_midnight_utc() {
        let parsed = parse_date(&json!("2024-11-21")).unwrap();
        assert_eq!(format_timestamp(&parsed), "2024-11-21T00:00:00.000Z");
    }

    #[test]
    fn rfc3339_with_offset_is_normalized_to_utc() {
        let parsed = parse_date(&json!("2024-11-21T10:30:00+02:00")).unwrap();
        assert_eq!(format_timestamp(&parsed), "2024-11-21T08:30:00.000Z");
    }

    #[test]
    fn naive_date_time_is_taken_as_utc() {
        let parsed = parse_date(&json!("2024-11-21T10:30:15.250")).unwrap();
        assert_eq!(format_timestamp(&parsed), "2024-11-21T10:30:15.250Z");
    }

    #[test]
    fn epoch_millis_are_accepted() {
        let parsed = parse_date(&json!(0)).unwrap();
        assert_eq!(format_timestamp(&parsed), "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn years_outside_four_digits_are_rejected() {
        // 10000-01-01T00:00:00Z and one millisecond before year 0.
        assert!(parse_date(&json!(253_402_300_800_000_i64)).is_none());
        assert!(parse_date(&json!(-62_167_219_200_001_i64)).is_none());
        assert!(parse_date(&json!("+10000-01-01T00:00:00Z")).is_none());

        let last = parse_date(&json!(253_402_300_799_999_i64)).unwrap();
        assert_eq!(format_timestamp(&last), "9999-12-31T23:59:59.999Z");
        let first = parse_date(&json!("0000-01-01")).unwrap();
        assert_eq!(parse_date_str(&format_timestamp(&first)), Some(first));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_date(&json!("not a date")).is_none());
        assert!(parse_date(&json!("2024-13-40")).is_none());
        assert!(parse_date(&json!("")).is_none());
        assert!(parse_date(&json!(true)).is_none());
        assert!(parse_date(&json!({"year": 2024})).is_none());
    }
}
