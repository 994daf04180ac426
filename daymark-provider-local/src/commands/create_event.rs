use anyhow::Result;
use daymark_core::host::protocol::CreateEvent;

use super::open_store;

pub fn handle(cmd: CreateEvent) -> Result<String> {
    let store = open_store(&cmd.params)?;
    store.create_event(&cmd.calendar_id, &cmd.event)
}
