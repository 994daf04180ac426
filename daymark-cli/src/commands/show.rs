use anyhow::Result;
use daymark_core::DayMarker;
use daymark_core::host::CalendarHost;
use owo_colors::OwoColorize;

use crate::render::render_window;

pub async fn run<H: CalendarHost>(mut session: DayMarker<H>, json: bool) -> Result<()> {
    if !super::start(&mut session).await? {
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(session.markings())?);
        return Ok(());
    }

    println!(
        "{}",
        render_window(session.markings(), &session.window(), session.today())
    );

    let marked = session.markings().marked_days().len();
    if marked == 0 {
        println!("{}", "No events in the next 30 days".dimmed());
    } else {
        println!(
            "{}",
            format!("{} across {} calendars", pluralize_days(marked), session.calendars().len())
                .dimmed()
        );
    }

    Ok(())
}

fn pluralize_days(count: usize) -> String {
    if count == 1 {
        "1 day with events".to_string()
    } else {
        format!("{count} days with events")
    }
}
