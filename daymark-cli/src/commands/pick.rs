use anyhow::Result;
use daymark_core::host::CalendarHost;
use daymark_core::{DateKey, DayMarker};
use dialoguer::{Confirm, Input};
use owo_colors::OwoColorize;

use crate::render::render_window;

pub async fn run<H: CalendarHost>(mut session: DayMarker<H>) -> Result<()> {
    if !super::start(&mut session).await? {
        return Ok(());
    }

    loop {
        println!(
            "{}",
            render_window(session.markings(), &session.window(), session.today())
        );
        println!();

        let input: String = Input::<String>::new()
            .with_prompt("  Day (YYYY-MM-DD, empty to quit)")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            return Ok(());
        }

        let key: DateKey = match input.parse() {
            Ok(key) => key,
            Err(e) => {
                println!("{}", e.to_string().red());
                continue;
            }
        };

        session.select_day(key);
        if session.markings().is_marked(&key) {
            println!("  {}", format!("{key} already has events").dimmed());
        }

        let create = Confirm::new()
            .with_prompt(format!("  Create a placeholder event on {key}?"))
            .default(true)
            .interact()?;

        if create {
            super::new::create_and_report(&mut session).await?;
        }
        println!();
    }
}
