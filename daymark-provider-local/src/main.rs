//! daymark-provider-local - local .ics directory host for daymark
//!
//! This binary implements the daymark host protocol, communicating
//! with daymark via JSON over stdin/stdout, one request per line.
//!
//! Calendars live under `local_dir` (default `~/calendar`), one
//! subdirectory per calendar, one .ics file per event.

mod commands;
mod ics;
mod local_config;
mod store;

use anyhow::Result;
use daymark_core::host::protocol::{Command, Request, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("DAYMARK_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                tracing::error!("Failed to read stdin: {}", e);
                break;
            }
        };

        // Skip empty lines
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => handle_request(request),
            Err(e) => Response::error(&format!("Failed to parse request: {}", e)),
        };

        writeln!(stdout, "{}", response)?;
        stdout.flush()?;
    }

    Ok(())
}

fn handle_request(request: Request) -> String {
    tracing::debug!(command = ?request.command, "request");
    match request.command {
        Command::RequestPermission => {
            dispatch(request.params, commands::request_permission::handle)
        }
        Command::ListCalendars => dispatch(request.params, commands::list_calendars::handle),
        Command::ListEvents => dispatch(request.params, commands::list_events::handle),
        Command::CreateEvent => dispatch(request.params, commands::create_event::handle),
    }
}

fn dispatch<C, R>(params: serde_json::Value, handler: impl FnOnce(C) -> Result<R>) -> String
where
    C: DeserializeOwned,
    R: Serialize,
{
    let cmd: C = match serde_json::from_value(params) {
        Ok(c) => c,
        Err(e) => return Response::error(&format!("Invalid params: {}", e)),
    };

    match handler(cmd) {
        Ok(data) => Response::success(data),
        Err(e) => Response::error(&format!("{:#}", e)),
    }
}
