//! .ics reading and writing for locally stored events.

use anyhow::{Context, Result, bail};
use chrono::{NaiveDateTime, NaiveTime, Utc};
use daymark_core::event::{HostEvent, HostTime, NewEvent};
use icalendar::{
    CalendarDateTime, Component, DatePerhapsTime, EventLike, Property,
    parser::{read_calendar, unfold},
};

/// An event as read back from an .ics file
#[derive(Debug, Clone)]
pub struct StoredEvent {
    pub uid: String,
    pub summary: String,
    pub start: DatePerhapsTime,
    pub end: DatePerhapsTime,
}

impl StoredEvent {
    /// Start as the wall-clock value the file encodes, for window filtering.
    /// Same basis as the date key of `to_host_event`.
    pub fn start_wall_clock(&self) -> NaiveDateTime {
        to_wall_clock(&self.start)
    }

    pub fn end_wall_clock(&self) -> NaiveDateTime {
        to_wall_clock(&self.end)
    }

    pub fn to_host_event(&self, calendar_id: &str) -> HostEvent {
        HostEvent {
            id: self.uid.clone(),
            title: self.summary.clone(),
            start: to_host_time(&self.start),
            end: to_host_time(&self.end),
            calendar_id: Some(calendar_id.to_string()),
        }
    }
}

/// Parse ICS content into the fields the local host needs
pub fn parse_event(content: &str) -> Option<StoredEvent> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).ok()?;
    let vevent = calendar.components.iter().find(|c| c.name == "VEVENT")?;

    let uid = vevent.find_prop("UID")?.val.to_string();
    let summary = vevent
        .find_prop("SUMMARY")
        .map(|p| p.val.to_string())
        .unwrap_or_else(|| "(No title)".to_string());
    let start = DatePerhapsTime::try_from(vevent.find_prop("DTSTART")?).ok()?;
    let end = match vevent.find_prop("DTEND") {
        Some(prop) => DatePerhapsTime::try_from(prop).ok()?,
        None => start.clone(),
    };

    Some(StoredEvent {
        uid,
        summary,
        start,
        end,
    })
}

/// Generate .ics content for a new event
pub fn generate_ics(uid: &str, event: &NewEvent) -> Result<String> {
    let mut cal = icalendar::Calendar::new();

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(uid);
    ics_event.summary(&event.title);
    ics_event.add_property("DTSTAMP", Utc::now().format("%Y%m%dT%H%M%SZ").to_string());

    add_datetime_property(&mut ics_event, "DTSTART", &event.start, &event.time_zone)?;
    add_datetime_property(&mut ics_event, "DTEND", &event.end, &event.time_zone)?;

    if let Some(ref loc) = event.location {
        ics_event.location(loc);
    }

    cal.push(ics_event.done());
    Ok(cal.done().to_string())
}

/// `UTC` is written with a Z suffix, any other zone as a TZID parameter.
fn add_datetime_property(
    ics_event: &mut icalendar::Event,
    name: &str,
    time: &NaiveDateTime,
    time_zone: &str,
) -> Result<()> {
    if time_zone.eq_ignore_ascii_case("UTC") {
        ics_event.add_property(name, time.format("%Y%m%dT%H%M%SZ").to_string());
        return Ok(());
    }

    let tz: chrono_tz::Tz = time_zone
        .parse()
        .map_err(|_| anyhow::anyhow!("Unknown time zone: {time_zone}"))?;
    let mut prop = Property::new(name, time.format("%Y%m%dT%H%M%S").to_string());
    prop.add_parameter("TZID", tz.name());
    ics_event.append_property(prop);
    Ok(())
}

/// Hand the time back the way the file encodes it.
fn to_host_time(dpt: &DatePerhapsTime) -> HostTime {
    match dpt {
        DatePerhapsTime::Date(d) => HostTime::Date(*d),
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(dt)) => HostTime::DateTime(dt.fixed_offset()),
        DatePerhapsTime::DateTime(CalendarDateTime::Floating(naive)) => {
            HostTime::Text(naive.format("%Y-%m-%dT%H:%M:%S").to_string())
        }
        DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, .. }) => {
            HostTime::Text(date_time.format("%Y-%m-%dT%H:%M:%S").to_string())
        }
    }
}

/// No zone conversion: a `Z` time is taken at its UTC wall-clock value.
fn to_wall_clock(dpt: &DatePerhapsTime) -> NaiveDateTime {
    match dpt {
        DatePerhapsTime::Date(d) => d.and_time(NaiveTime::MIN),
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(dt)) => dt.naive_utc(),
        DatePerhapsTime::DateTime(CalendarDateTime::Floating(naive)) => *naive,
        DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, .. }) => *date_time,
    }
}

/// Read and parse one .ics file.
pub fn read_event(path: &std::path::Path) -> Result<StoredEvent> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    match parse_event(&content) {
        Some(event) => Ok(event),
        None => bail!("Failed to parse event from {}", path.display()),
    }
}
