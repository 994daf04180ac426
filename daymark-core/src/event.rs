//! Host-neutral event types.
//!
//! Hosts convert whatever their calendar store holds into `HostEvent`.
//! Start and end times are kept in the shape the host delivered them; the
//! only thing daymark ever derives from them is a `DateKey`.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::constants::{
    PLACEHOLDER_DURATION_HOURS, PLACEHOLDER_LOCATION, PLACEHOLDER_START_HOUR,
    PLACEHOLDER_TIME_ZONE, PLACEHOLDER_TITLE,
};
use crate::date_key::DateKey;

/// An event as reported by a calendar host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostEvent {
    pub id: String,
    pub title: String,
    pub start: HostTime,
    pub end: HostTime,
    /// Calendar the event belongs to, when the host reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_id: Option<String>,
}

impl HostEvent {
    /// Day this event is marked on, or None if the start can't be read.
    pub fn date_key(&self) -> Option<DateKey> {
        self.start.date_key()
    }
}

/// A point in time as delivered by the host.
///
/// Serialized untagged: RFC 3339 strings decode as `DateTime`, bare
/// `YYYY-MM-DD` as `Date`, and anything else is kept verbatim as `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HostTime {
    DateTime(DateTime<FixedOffset>),
    Date(NaiveDate),
    Text(String),
}

impl HostTime {
    /// The calendar day this value encodes.
    ///
    /// Native timestamps use the date in their own offset; text is
    /// truncated at the time separator.
    pub fn date_key(&self) -> Option<DateKey> {
        match self {
            HostTime::DateTime(dt) => Some(DateKey::new(dt.date_naive())),
            HostTime::Date(d) => Some(DateKey::new(*d)),
            HostTime::Text(s) => DateKey::from_timestamp_text(s),
        }
    }
}

/// Request to create an event in a host calendar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub time_zone: String,
    pub location: Option<String>,
}

impl NewEvent {
    /// The fixed one-hour placeholder created on `date`.
    pub fn placeholder(date: DateKey) -> Self {
        let start_time = NaiveTime::from_hms_opt(PLACEHOLDER_START_HOUR, 0, 0).unwrap_or(NaiveTime::MIN);
        let start = date.date().and_time(start_time);

        NewEvent {
            title: PLACEHOLDER_TITLE.to_string(),
            start,
            end: start + Duration::hours(PLACEHOLDER_DURATION_HOURS),
            time_zone: PLACEHOLDER_TIME_ZONE.to_string(),
            location: Some(PLACEHOLDER_LOCATION.to_string()),
        }
    }
}
