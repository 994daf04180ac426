pub mod create_event;
pub mod list_calendars;
pub mod list_events;
pub mod request_permission;

use anyhow::Result;

use crate::local_config::LocalConfig;
use crate::store::LocalStore;

/// Open the store named by the request params.
pub fn open_store(params: &serde_json::Map<String, serde_json::Value>) -> Result<LocalStore> {
    let config = LocalConfig::try_from(params)?;
    Ok(LocalStore::new(config.local_dir))
}
