use anyhow::Result;
use daymark_core::calendar::HostCalendar;
use daymark_core::host::protocol::ListCalendars;

use super::open_store;

pub fn handle(cmd: ListCalendars) -> Result<Vec<HostCalendar>> {
    open_store(&cmd.params)?.calendars()
}
