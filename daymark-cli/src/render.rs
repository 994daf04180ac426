//! Terminal rendering for daymark types.
//!
//! Month grids stand in for a calendar widget: marked days carry a dot,
//! the selected day is highlighted, and days outside the event window
//! are dimmed.

use chrono::{Datelike, NaiveDate};
use daymark_core::calendar::HostCalendar;
use daymark_core::marking::{DayMark, Markings};
use daymark_core::window::EventWindow;
use daymark_core::{CreateOutcome, DateKey};
use owo_colors::{OwoColorize, Style};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for HostCalendar {
    fn render(&self) -> String {
        let access = if self.is_owner() {
            self.access_level.green().to_string()
        } else {
            self.access_level.dimmed().to_string()
        };
        format!("📅 {} {} {}", self, format!("({})", self.id).dimmed(), access)
    }
}

impl Render for CreateOutcome {
    fn render(&self) -> String {
        match self {
            CreateOutcome::Created { calendar, date, .. } => format!(
                "{} Created placeholder on {} in {}\n{}",
                "✓".green(),
                date.bold(),
                calendar,
                self.notice()
            ),
            CreateOutcome::AlreadyCreated { date, .. } => {
                format!("{} {} ({})", "=".yellow(), self.notice().yellow(), date)
            }
            CreateOutcome::NoDaySelected | CreateOutcome::NoCalendarAvailable => {
                format!("{} {}", "!".yellow(), self.notice().yellow())
            }
        }
    }
}

const WEEKDAY_HEADER: &str = "Mo Tu We Th Fr Sa Su";

/// Weeks of a month, Monday first. Cells outside the month are None.
pub fn month_weeks(year: i32, month: u32) -> Vec<[Option<NaiveDate>; 7]> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };

    let offset = first.weekday().num_days_from_monday() as usize;
    let days: Vec<NaiveDate> = first
        .iter_days()
        .take_while(|d| d.month() == month)
        .collect();

    let mut cells: Vec<Option<NaiveDate>> = vec![None; offset];
    cells.extend(days.into_iter().map(Some));
    while cells.len() % 7 != 0 {
        cells.push(None);
    }

    cells
        .chunks(7)
        .map(|chunk| {
            let mut week = [None; 7];
            week.copy_from_slice(chunk);
            week
        })
        .collect()
}

/// `(year, month)` pairs the window touches, in order.
pub fn months_in_window(window: &EventWindow) -> Vec<(i32, u32)> {
    let mut months: Vec<(i32, u32)> = Vec::new();
    for day in window.days() {
        let ym = (day.year(), day.month());
        if months.last() != Some(&ym) {
            months.push(ym);
        }
    }
    months
}

/// Plain three-column cell text: day number plus a dot when marked.
pub fn day_cell_text(date: NaiveDate, mark: Option<&DayMark>) -> String {
    let dot = if mark.is_some_and(DayMark::is_marked) { '•' } else { ' ' };
    format!("{:>2}{}", date.day(), dot)
}

fn day_style(mark: Option<&DayMark>, is_today: bool, in_window: bool) -> Style {
    let selected = mark.is_some_and(|m| m.selected);
    let marked = mark.is_some_and(DayMark::is_marked);

    let mut style = Style::new();
    if selected {
        style = style.black().on_cyan();
    } else if marked {
        style = style.green().bold();
    } else if is_today {
        style = style.cyan();
    } else if !in_window {
        style = style.dimmed();
    }
    style
}

pub fn render_month(
    year: i32,
    month: u32,
    markings: &Markings,
    window: &EventWindow,
    today: NaiveDate,
) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) {
        lines.push(format!("{:^20}", first.format("%B %Y").to_string()).bold().to_string());
    }
    lines.push(WEEKDAY_HEADER.dimmed().to_string());

    let last_in_window = window.to.date();
    for week in month_weeks(year, month) {
        let cells: Vec<String> = week
            .iter()
            .map(|cell| match cell {
                Some(date) => {
                    let mark = markings.get(&DateKey::new(*date));
                    let in_window = *date >= window.from.date() && *date <= last_in_window;
                    let style = day_style(mark, *date == today, in_window);
                    day_cell_text(*date, mark).style(style).to_string()
                }
                None => "   ".to_string(),
            })
            .collect();
        lines.push(cells.join("").trim_end().to_string());
    }

    lines
}

/// Every month the window touches, followed by a legend.
pub fn render_window(markings: &Markings, window: &EventWindow, today: NaiveDate) -> String {
    let mut lines = Vec::new();

    for (year, month) in months_in_window(window) {
        lines.extend(render_month(year, month, markings, window, today));
        lines.push(String::new());
    }

    lines.push(format!(
        "{} has events   {} selected   {} today",
        " 1•".green().bold(),
        " 1 ".black().on_cyan(),
        " 1 ".cyan()
    ));

    lines.join("\n")
}
