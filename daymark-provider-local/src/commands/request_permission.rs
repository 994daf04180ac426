use anyhow::Result;
use daymark_core::host::PermissionStatus;
use daymark_core::host::protocol::RequestPermission;

use crate::local_config::LocalConfig;
use crate::store::LocalStore;

pub fn handle(cmd: RequestPermission) -> Result<PermissionStatus> {
    let config = LocalConfig::try_from(&cmd.params)?;

    if let Some(forced) = config.permission {
        return Ok(forced);
    }

    let store = LocalStore::new(&config.local_dir);
    if store.is_accessible() {
        Ok(PermissionStatus::Granted)
    } else {
        tracing::warn!(dir = %config.local_dir.display(), "calendar directory not accessible");
        Ok(PermissionStatus::Denied)
    }
}
