//! Calendar values as the API exchanges them.
//!
//! The API writes a bare day as `2021-05-13` and an instant as an RFC 3339
//! timestamp with an offset. Which one a string is decides the variant.

use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A day (no time of day) or an instant with its UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrDateTime {
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
}

impl DateOrDateTime {
    /// Parse an API date string, trying the timestamp form before the day form.
    pub fn parse(input: &str) -> Option<Self> {
        if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
            return Some(DateOrDateTime::DateTime(instant));
        }
        NaiveDate::parse_from_str(input, DATE_FORMAT)
            .ok()
            .map(DateOrDateTime::Date)
    }

    pub fn to_api_string(&self) -> String {
        match self {
            DateOrDateTime::Date(day) => day.format(DATE_FORMAT).to_string(),
            DateOrDateTime::DateTime(instant) => {
                instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
            }
        }
    }
}

impl From<NaiveDate> for DateOrDateTime {
    fn from(day: NaiveDate) -> Self {
        DateOrDateTime::Date(day)
    }
}

impl From<DateTime<FixedOffset>> for DateOrDateTime {
    fn from(instant: DateTime<FixedOffset>) -> Self {
        DateOrDateTime::DateTime(instant)
    }
}

impl fmt::Display for DateOrDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_api_string())
    }
}

impl Serialize for DateOrDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_api_string())
    }
}

impl<'de> Deserialize<'de> for DateOrDateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| de::Error::custom(format!("'{}' is not a date or date-time", raw)))
    }
}

/// A single date or a start/end range, with an optional IANA time zone.
///
/// `start <= end` is not checked; the API decides what a reversed range means.
/// `end` and `time_zone` are omitted, not nulled, when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateOrDateRange {
    pub start: DateOrDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateOrDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl DateOrDateRange {
    pub fn single(start: impl Into<DateOrDateTime>) -> Self {
        Self {
            start: start.into(),
            end: None,
            time_zone: None,
        }
    }

    pub fn range(start: impl Into<DateOrDateTime>, end: impl Into<DateOrDateTime>) -> Self {
        Self {
            start: start.into(),
            end: Some(end.into()),
            time_zone: None,
        }
    }

    pub fn with_time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = Some(time_zone.into());
        self
    }

    pub fn is_range(&self) -> bool {
        self.end.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_day_and_instant_forms() {
        let day = DateOrDateTime::parse("2021-05-13").unwrap();
        assert_eq!(
            day,
            DateOrDateTime::Date(NaiveDate::from_ymd_opt(2021, 5, 13).unwrap())
        );

        let instant = DateOrDateTime::parse("2021-05-13T11:22:00.000+02:00").unwrap();
        assert!(matches!(instant, DateOrDateTime::DateTime(_)));
        assert!(DateOrDateTime::parse("13/05/2021").is_none());
    }

    #[test]
    fn formats_back_to_api_strings() {
        let day = DateOrDateTime::parse("2021-05-13").unwrap();
        assert_eq!(day.to_api_string(), "2021-05-13");

        let instant = DateOrDateTime::parse("2021-05-13T11:22:00+02:00").unwrap();
        assert_eq!(instant.to_api_string(), "2021-05-13T11:22:00+02:00");
        assert_eq!(
            DateOrDateTime::parse(&instant.to_api_string()),
            Some(instant)
        );
    }

    #[test]
    fn range_reads_nulls_and_writes_only_what_is_set() {
        let single: DateOrDateRange =
            serde_json::from_value(json!({"start": "2024-03-01", "end": null, "time_zone": null}))
                .unwrap();
        assert!(!single.is_range());
        assert_eq!(serde_json::to_value(&single).unwrap(), json!({"start": "2024-03-01"}));

        let zoned = DateOrDateRange::range(
            DateOrDateTime::parse("2024-03-01T09:00:00+01:00").unwrap(),
            DateOrDateTime::parse("2024-03-01T17:30:00+01:00").unwrap(),
        )
        .with_time_zone("Europe/Paris");
        assert_eq!(
            serde_json::to_value(&zoned).unwrap(),
            json!({
                "start": "2024-03-01T09:00:00+01:00",
                "end": "2024-03-01T17:30:00+01:00",
                "time_zone": "Europe/Paris"
            })
        );
    }

    #[test]
    fn unparseable_date_names_the_input() {
        let err = serde_json::from_value::<DateOrDateRange>(json!({"start": "13/05/2021"}))
            .unwrap_err();
        assert!(err.to_string().contains("'13/05/2021' is not a date or date-time"));
        assert!(serde_json::from_value::<DateOrDateRange>(json!({"end": "2021-05-13"})).is_err());
    }
}
