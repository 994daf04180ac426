//! Per-day display state.
//!
//! `Markings` maps each `DateKey` to a `DayMark`. Two independent flags live
//! in a mark: `marked` (an event exists that day) and `selected` (the user
//! picked that day). Every transition here is a field-level merge, so
//! setting one flag never clears the other.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::date_key::DateKey;
use crate::event::HostEvent;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayMark {
    pub selected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marked: Option<bool>,
}

impl DayMark {
    pub fn is_marked(&self) -> bool {
        self.marked.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Markings(BTreeMap<DateKey, DayMark>);

impl Markings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build markings from scratch: one `{selected: false, marked: true}`
    /// entry per distinct event day. Events whose start can't be read are skipped.
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a HostEvent>) -> Self {
        let mut markings = Markings::new();

        for event in events {
            let Some(key) = event.date_key() else {
                tracing::warn!(event_id = %event.id, start = ?event.start, "skipping event with unreadable start");
                continue;
            };

            let mark = markings.0.entry(key).or_default();
            mark.selected = false;
            mark.marked = Some(true);
        }

        markings
    }

    /// The user picked `key`. Keeps an existing `marked` flag.
    pub fn select(&mut self, key: DateKey) {
        self.0.entry(key).or_default().selected = true;
    }

    /// An event was just created on `key`.
    pub fn mark_created(&mut self, key: DateKey) {
        let mark = self.0.entry(key).or_default();
        mark.selected = true;
        mark.marked = Some(true);
    }

    pub fn get(&self, key: &DateKey) -> Option<&DayMark> {
        self.0.get(key)
    }

    pub fn is_marked(&self, key: &DateKey) -> bool {
        self.get(key).is_some_and(DayMark::is_marked)
    }

    pub fn is_selected(&self, key: &DateKey) -> bool {
        self.get(key).is_some_and(|m| m.selected)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DateKey, &DayMark)> {
        self.0.iter()
    }

    /// Days with at least one event, in date order.
    pub fn marked_days(&self) -> Vec<DateKey> {
        self.0
            .iter()
            .filter(|(_, mark)| mark.is_marked())
            .map(|(key, _)| *key)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::HostTime;
    use chrono::DateTime;

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    fn event(id: &str, start: HostTime) -> HostEvent {
        HostEvent {
            id: id.to_string(),
            title: format!("Event {id}"),
            end: start.clone(),
            start,
            calendar_id: None,
        }
    }

    fn text(s: &str) -> HostTime {
        HostTime::Text(s.to_string())
    }

    #[test]
    fn from_events_marks_each_distinct_day() {
        // Events gathered from two different calendars, with mixed start shapes
        let events = vec![
            event("a", text("2024-06-01T10:00:00Z")),
            event("b", HostTime::DateTime(DateTime::parse_from_rfc3339("2024-06-01T15:00:00Z").unwrap())),
            event("c", text("2024-06-03T09:00:00")),
            event("d", HostTime::Date("2024-06-07".parse().unwrap())),
        ];

        let markings = Markings::from_events(&events);

        assert_eq!(
            markings.marked_days(),
            vec![key("2024-06-01"), key("2024-06-03"), key("2024-06-07")]
        );
        assert_eq!(markings.len(), 3);
        for (_, mark) in markings.iter() {
            assert_eq!(*mark, DayMark { selected: false, marked: Some(true) });
        }
    }

    #[test]
    fn from_events_skips_unreadable_starts() {
        let events = vec![event("a", text("whenever")), event("b", text("2024-06-02"))];
        let markings = Markings::from_events(&events);
        assert_eq!(markings.marked_days(), vec![key("2024-06-02")]);
    }

    #[test]
    fn from_events_empty() {
        assert!(Markings::from_events(&Vec::<HostEvent>::new()).is_empty());
    }

    #[test]
    fn select_preserves_marked() {
        let events = vec![event("a", text("2024-06-10T08:00:00Z"))];
        let mut markings = Markings::from_events(&events);

        markings.select(key("2024-06-10"));

        assert_eq!(
            markings.get(&key("2024-06-10")),
            Some(&DayMark { selected: true, marked: Some(true) })
        );
    }

    #[test]
    fn select_unmarked_day_only_sets_selected() {
        let mut markings = Markings::new();
        markings.select(key("2024-06-11"));

        assert_eq!(
            markings.get(&key("2024-06-11")),
            Some(&DayMark { selected: true, marked: None })
        );
        assert!(!markings.is_marked(&key("2024-06-11")));
    }

    #[test]
    fn earlier_selections_stay_selected() {
        let mut markings = Markings::new();
        markings.select(key("2024-06-11"));
        markings.select(key("2024-06-12"));

        assert!(markings.is_selected(&key("2024-06-11")));
        assert!(markings.is_selected(&key("2024-06-12")));
    }

    #[test]
    fn mark_created_sets_both_flags() {
        let mut markings = Markings::new();
        markings.select(key("2024-06-10"));
        markings.mark_created(key("2024-06-10"));
        markings.mark_created(key("2024-06-10"));

        assert_eq!(
            markings.get(&key("2024-06-10")),
            Some(&DayMark { selected: true, marked: Some(true) })
        );
        assert_eq!(markings.len(), 1);
    }

    #[test]
    fn serializes_like_a_widget_prop() {
        let mut markings = Markings::new();
        markings.select(key("2024-06-11"));
        markings.mark_created(key("2024-06-10"));

        let json = serde_json::to_value(&markings).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "2024-06-10": { "selected": true, "marked": true },
                "2024-06-11": { "selected": true },
            })
        );
    }
}
