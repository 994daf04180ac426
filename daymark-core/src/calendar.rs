//! Calendars as reported by a calendar host.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A host calendar that can hold events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostCalendar {
    pub id: String,
    pub name: String,
    pub access_level: AccessLevel,
}

impl HostCalendar {
    /// Whether the current user may create events in this calendar.
    pub fn is_owner(&self) -> bool {
        self.access_level.is_owner()
    }
}

impl fmt::Display for HostCalendar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// What the current user may do with a calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    #[default]
    Owner,
    Editor,
    Contributor,
    Read,
    Respond,
    Freebusy,
    Override,
    Root,
    None,
    #[serde(other)]
    Unknown,
}

impl AccessLevel {
    pub fn is_owner(&self) -> bool {
        matches!(self, AccessLevel::Owner)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Owner => "owner",
            AccessLevel::Editor => "editor",
            AccessLevel::Contributor => "contributor",
            AccessLevel::Read => "read",
            AccessLevel::Respond => "respond",
            AccessLevel::Freebusy => "freebusy",
            AccessLevel::Override => "override",
            AccessLevel::Root => "root",
            AccessLevel::None => "none",
            AccessLevel::Unknown => "unknown",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick the calendar new events go to: the first owner calendar, in host order.
pub fn first_owned(calendars: &[HostCalendar]) -> Option<&HostCalendar> {
    calendars.iter().find(|c| c.is_owner())
}
