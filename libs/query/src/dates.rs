//! Date parsing and range bounds for `startDate` / `endDate` filters.
//!
//! Accepted inputs:
//! - RFC 3339 (`2024-01-01T08:30:00Z`, `2024-01-01T08:30:00+07:00`)
//! - Local date-time without offset, taken as UTC (`2024-01-01T08:30:00`)
//! - Plain date, taken as UTC midnight (`2024-01-01`)
//!
//! Anything else is treated as "bound not supplied".

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Serialize, Serializer};

const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Inclusive date range with optional bounds.
///
/// Serialized as `{"$gte": .., "$lte": ..}` containing only the bounds that are set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Parse both bounds; unparseable bounds are dropped, never reported.
    pub fn parse(from: Option<&str>, to: Option<&str>) -> Self {
        Self {
            from: parse_bound("from", from),
            to: parse_bound("to", to),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from.map_or(true, |from| instant >= from) && self.to.map_or(true, |to| instant <= to)
    }
}

fn parse_bound(bound: &str, raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?;
    let parsed = parse_date(raw);
    if parsed.is_none() && !raw.trim().is_empty() {
        tracing::debug!(bound, value = %raw, "Ignoring unparseable date bound");
    }
    parsed
}

/// Timestamps are emitted the way JavaScript's `Date#toJSON` renders them.
pub(crate) fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl Serialize for DateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        let len = usize::from(self.from.is_some()) + usize::from(self.to.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(from) = &self.from {
            map.serialize_entry("$gte", &format_instant(from))?;
        }
        if let Some(to) = &self.to {
            map.serialize_entry("$lte", &format_instant(to))?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn parses_supported_formats() {
        assert_eq!(parse_date("2024-01-01"), Some(utc(2024, 1, 1, 0, 0)));
        assert_eq!(parse_date("2024-01-01T08:30:00Z"), Some(utc(2024, 1, 1, 8, 30)));
        assert_eq!(
            parse_date("2024-01-01T08:30:00+07:00"),
            Some(utc(2024, 1, 1, 1, 30))
        );
        assert_eq!(parse_date("2024-01-01T08:30:00"), Some(utc(2024, 1, 1, 8, 30)));
        assert_eq!(parse_date(" 2024-01-01T08:30 "), Some(utc(2024, 1, 1, 8, 30)));
    }

    #[test]
    fn rejects_garbage_without_panicking() {
        for bad in ["", "   ", "not-a-date", "2024-13-01", "2024-02-30", "01/02/2024"] {
            assert_eq!(parse_date(bad), None, "{bad:?}");
        }
    }

    #[test]
    fn range_keeps_only_valid_bounds() {
        let range = DateRange::parse(Some("2024-01-01"), Some("not-a-date"));
        assert_eq!(range.from, Some(utc(2024, 1, 1, 0, 0)));
        assert_eq!(range.to, None);
        assert_eq!(
            serde_json::to_value(range).unwrap(),
            json!({"$gte": "2024-01-01T00:00:00.000Z"})
        );

        assert!(DateRange::parse(None, Some("")).is_empty());
    }

    #[test]
    fn one_sided_ranges_contain_expected_instants() {
        let upper_only = DateRange::parse(None, Some("2024-06-30"));
        assert!(upper_only.contains(utc(2020, 1, 1, 0, 0)));
        assert!(!upper_only.contains(utc(2024, 7, 1, 0, 0)));

        let both = DateRange::parse(Some("2024-01-01"), Some("2024-01-31"));
        assert!(both.contains(utc(2024, 1, 15, 12, 0)));
        assert!(!both.contains(utc(2023, 12, 31, 23, 59)));
    }
}
