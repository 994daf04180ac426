//! Calendars stored as directories of .ics files.
//!
//! ```text
//! <local_dir>/
//!   personal/
//!     .daymark/calendar.toml      (name, access_level)
//!     2024-06-10T1000__new-event.ics
//!   holidays/
//!     .daymark/calendar.toml
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use daymark_core::calendar::{AccessLevel, HostCalendar};
use daymark_core::event::NewEvent;
use daymark_core::window::EventWindow;
use serde::{Deserialize, Serialize};

use crate::ics::{StoredEvent, generate_ics, read_event};

const META_FILE: &str = ".daymark/calendar.toml";

/// Contents of a calendar's .daymark/calendar.toml
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CalendarMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub access_level: AccessLevel,
}

pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        LocalStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the root can be listed, or could be created on first write.
    /// Never touches the filesystem.
    pub fn is_accessible(&self) -> bool {
        if self.root.exists() {
            return std::fs::read_dir(&self.root).is_ok();
        }
        self.root
            .ancestors()
            .skip(1)
            .find(|dir| dir.exists())
            .and_then(|dir| std::fs::metadata(dir).ok())
            .is_some_and(|meta| meta.is_dir() && !meta.permissions().readonly())
    }

    fn calendar_dir(&self, id: &str) -> Result<PathBuf> {
        if id.is_empty() || id.starts_with('.') || id.contains(['/', '\\']) {
            bail!("Invalid calendar id: {id}");
        }
        Ok(self.root.join(id))
    }

    /// All calendars under the root, sorted by id.
    pub fn calendars(&self) -> Result<Vec<HostCalendar>> {
        let Ok(entries) = std::fs::read_dir(&self.root) else {
            return Ok(Vec::new());
        };

        let mut calendars: Vec<HostCalendar> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .filter_map(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .filter(|name| !name.starts_with('.'))
                    .map(|name| name.to_string())
            })
            .map(|id| self.calendar(&id))
            .collect::<Result<_>>()?;

        calendars.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(calendars)
    }

    pub fn calendar(&self, id: &str) -> Result<HostCalendar> {
        let dir = self.calendar_dir(id)?;
        if !dir.is_dir() {
            bail!("Calendar not found: {id}");
        }

        let meta_path = dir.join(META_FILE);
        let meta: CalendarMeta = if meta_path.exists() {
            let content = std::fs::read_to_string(&meta_path)?;
            toml::from_str(&content)
                .with_context(|| format!("Invalid calendar config {}", meta_path.display()))?
        } else {
            CalendarMeta::default()
        };

        Ok(HostCalendar {
            id: id.to_string(),
            name: meta.name.unwrap_or_else(|| id.to_string()),
            access_level: meta.access_level,
        })
    }

    /// Create a calendar directory with its metadata.
    pub fn create_calendar(&self, id: &str, meta: &CalendarMeta) -> Result<HostCalendar> {
        let dir = self.calendar_dir(id)?;
        std::fs::create_dir_all(dir.join(".daymark"))?;
        std::fs::write(dir.join(META_FILE), toml::to_string_pretty(meta)?)?;
        self.calendar(id)
    }

    /// Events of one calendar. Unreadable files are skipped.
    pub fn events(&self, calendar_id: &str) -> Result<Vec<StoredEvent>> {
        let dir = self.calendar_dir(calendar_id)?;
        let Ok(entries) = std::fs::read_dir(&dir) else {
            bail!("Calendar not found: {calendar_id}");
        };

        let events = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|e| e == "ics"))
            .filter_map(|path| match read_event(&path) {
                Ok(event) => Some(event),
                Err(e) => {
                    tracing::warn!("{e:#}");
                    None
                }
            })
            .collect();

        Ok(events)
    }

    /// Events of one calendar intersecting `window`, ordered by start.
    pub fn events_in(&self, calendar_id: &str, window: &EventWindow) -> Result<Vec<StoredEvent>> {
        let mut events: Vec<_> = self
            .events(calendar_id)?
            .into_iter()
            .filter(|e| window.intersects(e.start_wall_clock(), e.end_wall_clock()))
            .collect();
        events.sort_by_key(|e| e.start_wall_clock());
        Ok(events)
    }

    /// Write a new event file and return its uid.
    pub fn create_event(&self, calendar_id: &str, event: &NewEvent) -> Result<String> {
        let calendar = self.calendar(calendar_id)?;
        if !calendar.is_owner() {
            bail!(
                "Calendar '{}' is {}; events can only be created in owner calendars",
                calendar.id,
                calendar.access_level
            );
        }

        let uid = uuid::Uuid::new_v4().to_string();
        let path = self.unique_event_path(calendar_id, event)?;
        std::fs::write(&path, generate_ics(&uid, event)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        tracing::info!(path = %path.display(), "event written");
        Ok(uid)
    }

    /// `YYYY-MM-DDTHHMM__slug.ics`, suffixed `-2`, `-3`... on collision.
    fn unique_event_path(&self, calendar_id: &str, event: &NewEvent) -> Result<PathBuf> {
        let dir = self.calendar_dir(calendar_id)?;
        let base = format!(
            "{}__{}",
            event.start.format("%Y-%m-%dT%H%M"),
            slug::slugify(&event.title)
        );

        let path = dir.join(format!("{base}.ics"));
        if !path.exists() {
            return Ok(path);
        }

        for n in 2..=100 {
            let path = dir.join(format!("{base}-{n}.ics"));
            if !path.exists() {
                return Ok(path);
            }
        }

        bail!("Too many event name collisions for '{base}'")
    }
}
