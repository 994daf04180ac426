//! Calendar hosts: whatever owns the calendars, their events and the
//! permission to touch them.

pub mod protocol;
pub mod provider;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calendar::HostCalendar;
use crate::config::{DaymarkConfig, ProviderConfig};
use crate::error::DaymarkResult;
use crate::event::{HostEvent, NewEvent};
use crate::host::protocol::{CreateEvent, ListCalendars, ListEvents, RequestPermission};
use crate::host::provider::Provider;
use crate::window::EventWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

impl PermissionStatus {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

impl fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            PermissionStatus::Granted => "granted",
            PermissionStatus::Denied => "denied",
            PermissionStatus::Undetermined => "undetermined",
        };
        f.write_str(s)
    }
}

/// The calendar store daymark reads from and writes to.
#[allow(async_fn_in_trait)]
pub trait CalendarHost {
    async fn request_permission(&self) -> DaymarkResult<PermissionStatus>;

    /// Calendars that can hold events, in the host's own order.
    async fn list_calendars(&self) -> DaymarkResult<Vec<HostCalendar>>;

    async fn list_events(
        &self,
        calendar_ids: &[String],
        window: &EventWindow,
    ) -> DaymarkResult<Vec<HostEvent>>;

    /// Returns the id of the created event.
    async fn create_event(&self, calendar_id: &str, event: &NewEvent) -> DaymarkResult<String>;
}

/// A host reached through a provider binary.
#[derive(Debug, Clone)]
pub struct ProviderHost {
    pub provider: Provider,
    pub config: ProviderConfig,
}

impl ProviderHost {
    pub fn new(provider: Provider, config: ProviderConfig) -> Self {
        ProviderHost { provider, config }
    }

    pub fn from_config(config: &DaymarkConfig) -> Self {
        ProviderHost::new(
            Provider::from_name(&config.provider),
            config.provider_config.clone(),
        )
    }

    fn params(&self) -> serde_json::Map<String, serde_json::Value> {
        serde_json::Map::from(&self.config)
    }
}

impl CalendarHost for ProviderHost {
    async fn request_permission(&self) -> DaymarkResult<PermissionStatus> {
        self.provider
            .call_interactive(RequestPermission {
                params: self.params(),
            })
            .await
    }

    async fn list_calendars(&self) -> DaymarkResult<Vec<HostCalendar>> {
        self.provider
            .call(ListCalendars {
                params: self.params(),
            })
            .await
    }

    async fn list_events(
        &self,
        calendar_ids: &[String],
        window: &EventWindow,
    ) -> DaymarkResult<Vec<HostEvent>> {
        self.provider
            .call(ListEvents {
                params: self.params(),
                calendar_ids: calendar_ids.to_vec(),
                from: window.from_param(),
                to: window.to_param(),
            })
            .await
    }

    async fn create_event(&self, calendar_id: &str, event: &NewEvent) -> DaymarkResult<String> {
        self.provider
            .call(CreateEvent {
                params: self.params(),
                calendar_id: calendar_id.to_string(),
                event: event.clone(),
            })
            .await
    }
}
