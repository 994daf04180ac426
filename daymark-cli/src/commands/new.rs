use anyhow::{Context, Result};
use daymark_core::host::CalendarHost;
use daymark_core::{DateKey, DayMarker};

use crate::render::{Render, render_window};
use crate::utils::tui::create_spinner;

pub async fn run<H: CalendarHost>(mut session: DayMarker<H>, date: Option<String>) -> Result<()> {
    // Parse before touching the host so typos fail fast
    let date: Option<DateKey> = date
        .map(|d| d.parse::<DateKey>().with_context(|| format!("Invalid --date '{d}'")))
        .transpose()?;

    if !super::start(&mut session).await? {
        return Ok(());
    }

    if let Some(date) = date {
        session.select_day(date);
    }

    create_and_report(&mut session).await?;

    println!();
    println!(
        "{}",
        render_window(session.markings(), &session.window(), session.today())
    );

    Ok(())
}

/// Create the placeholder for the selected day and print what happened.
pub async fn create_and_report<H: CalendarHost>(session: &mut DayMarker<H>) -> Result<()> {
    let spinner = create_spinner("Creating event...");
    let outcome = session.create_event().await;
    spinner.finish_and_clear();

    let outcome = outcome.context("Failed to create event")?;
    println!("{}", outcome.render());
    Ok(())
}
