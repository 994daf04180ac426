//! Time window for event queries.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::constants::WINDOW_DAYS;

const WINDOW_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Closed window `[from, to]` in local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventWindow {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

impl EventWindow {
    /// `[today 00:00, today + WINDOW_DAYS 00:00]`
    pub fn next_days(today: NaiveDate) -> Self {
        let from = today.and_time(NaiveTime::MIN);
        EventWindow {
            from,
            to: from + Duration::days(WINDOW_DAYS),
        }
    }

    /// A single day: `[date 00:00, date 23:59:59]`
    pub fn day(date: NaiveDate) -> Self {
        let from = date.and_time(NaiveTime::MIN);
        EventWindow {
            from,
            to: from + Duration::days(1) - Duration::seconds(1),
        }
    }

    /// Whether the event `[start, end)` overlaps this window. An event
    /// starting exactly at `to` counts, as does a zero-length one at `from`.
    pub fn intersects(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start <= self.to && (end > self.from || start == self.from)
    }

    /// Days covered by the window, in order, including the day `to` falls on.
    pub fn days(&self) -> Vec<NaiveDate> {
        let last = self.to.date();
        self.from
            .date()
            .iter_days()
            .take_while(|d| *d <= last)
            .collect()
    }

    /// `from` as sent to hosts (`YYYY-MM-DDTHH:MM:SS`, local wall-clock).
    pub fn from_param(&self) -> String {
        self.from.format(WINDOW_FORMAT).to_string()
    }

    /// `to` as sent to hosts.
    pub fn to_param(&self) -> String {
        self.to.format(WINDOW_FORMAT).to_string()
    }
}
