/// Number of days ahead of today whose events get marked.
pub const WINDOW_DAYS: i64 = 30;

/// Placeholder event written by `DayMarker::create_event`.
pub const PLACEHOLDER_TITLE: &str = "New Event";
pub const PLACEHOLDER_LOCATION: &str = "My city";
pub const PLACEHOLDER_TIME_ZONE: &str = "UTC";
pub const PLACEHOLDER_START_HOUR: u32 = 10;
pub const PLACEHOLDER_DURATION_HOURS: i64 = 1;

pub const NO_DAY_SELECTED: &str = "Select a day on the calendar first!";
pub const NO_CALENDAR_AVAILABLE: &str = "No calendar available!";

pub const JOKE: &str =
    "Joke time! Why don't vegetables ever fight? Because they don't want to get into a pickle!";
