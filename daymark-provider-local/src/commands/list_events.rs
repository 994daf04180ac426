//! List events of the requested calendars within a time range.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use daymark_core::event::HostEvent;
use daymark_core::host::protocol::ListEvents;
use daymark_core::window::EventWindow;

use super::open_store;

pub fn handle(cmd: ListEvents) -> Result<Vec<HostEvent>> {
    let store = open_store(&cmd.params)?;
    let window = EventWindow {
        from: parse_bound(&cmd.from)?,
        to: parse_bound(&cmd.to)?,
    };

    let mut events = Vec::new();
    for calendar_id in &cmd.calendar_ids {
        let stored = store.events_in(calendar_id, &window)?;
        events.extend(stored.iter().map(|e| e.to_host_event(calendar_id)));
    }

    Ok(events)
}

/// Accepts `YYYY-MM-DDTHH:MM:SS`, with or without a trailing offset.
fn parse_bound(s: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .with_context(|| format!("Invalid time bound '{s}'"))
}
