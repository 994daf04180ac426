//! Normalized `YYYY-MM-DD` day keys.
//!
//! A `DateKey` is the join key between "events that exist" and "days that
//! get highlighted". Hosts hand back start times in several shapes; all of
//! them end up here.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DaymarkError;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        DateKey(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Truncate a timestamp string to its date component.
    ///
    /// Everything from the first `T` (or space) on is dropped, so
    /// `"2024-06-01T10:00:00Z"`, `"2024-06-01 10:00"` and `"2024-06-01"`
    /// all give `2024-06-01`. No timezone conversion is applied.
    pub fn from_timestamp_text(s: &str) -> Option<Self> {
        let date_part = s.trim().split(['T', ' ']).next()?;
        date_part.parse().ok()
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        DateKey(date)
    }
}

impl FromStr for DateKey {
    type Err = DaymarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), DATE_KEY_FORMAT)
            .map(DateKey)
            .map_err(|_| DaymarkError::InvalidDateKey(s.to_string()))
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_iso_day() {
        let key: DateKey = "2024-06-01".parse().unwrap();
        assert_eq!(key.date(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(key.to_string(), "2024-06-01");
    }

    #[test]
    fn rejects_non_dates() {
        assert!("tomorrow".parse::<DateKey>().is_err());
        assert!("2024-13-01".parse::<DateKey>().is_err());
        assert!("".parse::<DateKey>().is_err());
    }

    #[test]
    fn truncates_timestamp_text() {
        let expected: DateKey = "2024-06-01".parse().unwrap();
        assert_eq!(DateKey::from_timestamp_text("2024-06-01T10:00:00Z"), Some(expected));
        assert_eq!(DateKey::from_timestamp_text("2024-06-01T23:30:00-03:00"), Some(expected));
        assert_eq!(DateKey::from_timestamp_text("2024-06-01 08:15"), Some(expected));
        assert_eq!(DateKey::from_timestamp_text("2024-06-01"), Some(expected));
        assert_eq!(DateKey::from_timestamp_text("not a date"), None);
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = DateKey::from_timestamp_text("2024-06-01T10:00:00Z").unwrap();
        let twice = DateKey::from_timestamp_text(&once.to_string()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn serializes_as_plain_string() {
        let key: DateKey = "2024-06-10".parse().unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2024-06-10\"");
        let back: DateKey = serde_json::from_str("\"2024-06-10\"").unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn orders_chronologically() {
        let a: DateKey = "2024-05-31".parse().unwrap();
        let b: DateKey = "2024-06-01".parse().unwrap();
        assert!(a < b);
    }
}
