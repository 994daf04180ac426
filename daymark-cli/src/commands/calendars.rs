use anyhow::Result;
use daymark_core::DayMarker;
use daymark_core::host::CalendarHost;
use owo_colors::OwoColorize;

use crate::render::Render;

pub async fn run<H: CalendarHost>(mut session: DayMarker<H>) -> Result<()> {
    if !super::start(&mut session).await? {
        return Ok(());
    }

    if session.calendars().is_empty() {
        println!("{}", "No calendars found".dimmed());
        return Ok(());
    }

    for calendar in session.calendars() {
        println!("{}", calendar.render());
    }

    if !session.calendars().iter().any(|c| c.is_owner()) {
        println!();
        println!(
            "{}",
            "None of these calendars accept new events (owner access needed)".yellow()
        );
    }

    Ok(())
}
