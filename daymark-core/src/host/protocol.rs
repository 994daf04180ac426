//! Defines the JSON protocol used for communication between daymark and
//! calendar host binaries over stdin/stdout.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::calendar::HostCalendar;
use crate::event::{HostEvent, NewEvent};
use crate::host::PermissionStatus;

pub trait HostCommand: Serialize {
    type Response: DeserializeOwned;
    fn command() -> Command;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    RequestPermission,
    ListCalendars,
    ListEvents,
    CreateEvent,
}

/// Request sent from daymark to a host.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Response sent from a host back to daymark.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}

impl<T: Serialize> Response<T> {
    pub fn success(data: T) -> String {
        serde_json::to_string(&Response::Success { data })
            .unwrap_or_else(|e| Response::error(&format!("Failed to serialize response: {e}")))
    }
}

impl Response<()> {
    pub fn error(msg: &str) -> String {
        serde_json::json!({ "status": "error", "error": msg }).to_string()
    }
}

/// Ask the host for calendar access. May block on user interaction.
#[derive(Debug, Serialize, Deserialize)]
pub struct RequestPermission {
    /// Host-specific config (e.g., local_dir)
    #[serde(flatten)]
    pub params: serde_json::Map<String, serde_json::Value>,
}

impl HostCommand for RequestPermission {
    type Response = PermissionStatus;
    fn command() -> Command {
        Command::RequestPermission
    }
}

/// List the calendars that can hold events.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListCalendars {
    #[serde(flatten)]
    pub params: serde_json::Map<String, serde_json::Value>,
}

impl HostCommand for ListCalendars {
    type Response = Vec<HostCalendar>;
    fn command() -> Command {
        Command::ListCalendars
    }
}

/// List events of the given calendars intersecting the closed window `[from, to]`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListEvents {
    #[serde(flatten)]
    pub params: serde_json::Map<String, serde_json::Value>,
    pub calendar_ids: Vec<String>,
    pub from: String,
    pub to: String,
}

impl HostCommand for ListEvents {
    type Response = Vec<HostEvent>;
    fn command() -> Command {
        Command::ListEvents
    }
}

/// Create an event; the host answers with the new event id.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateEvent {
    #[serde(flatten)]
    pub params: serde_json::Map<String, serde_json::Value>,
    pub calendar_id: String,
    pub event: NewEvent,
}

impl HostCommand for CreateEvent {
    type Response = String;
    fn command() -> Command {
        Command::CreateEvent
    }
}
