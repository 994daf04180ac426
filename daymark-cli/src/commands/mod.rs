pub mod calendars;
pub mod new;
pub mod pick;
pub mod show;

use anyhow::{Context, Result};
use daymark_core::host::CalendarHost;
use daymark_core::{DayMarker, Discovery};
use owo_colors::OwoColorize;

use crate::utils::tui::create_spinner;

/// Run discovery and aggregation. Returns false if calendar access was not granted.
pub async fn start<H: CalendarHost>(session: &mut DayMarker<H>) -> Result<bool> {
    let spinner = create_spinner("Reading calendars...");
    let discovery = session.initialize().await;
    spinner.finish_and_clear();

    match discovery.context("Failed to read calendars")? {
        Discovery::Ready {
            calendars,
            marked_days,
        } => {
            tracing::info!(calendars, marked_days, "session ready");
            Ok(true)
        }
        Discovery::PermissionDenied(status) => {
            println!(
                "{}",
                format!("Calendar access {status}. Nothing to show.").yellow()
            );
            Ok(false)
        }
    }
}
