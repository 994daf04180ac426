//! Local-host configuration, read from the params of each request.

use std::path::PathBuf;

use anyhow::{Context, Result};
use daymark_core::host::PermissionStatus;

static DEFAULT_LOCAL_DIR: &str = "~/calendar";

#[derive(Debug, Clone)]
pub struct LocalConfig {
    /// Root directory, one subdirectory per calendar
    pub local_dir: PathBuf,
    /// Forced answer to permission requests (for testing front-ends)
    pub permission: Option<PermissionStatus>,
}

impl TryFrom<&serde_json::Map<String, serde_json::Value>> for LocalConfig {
    type Error = anyhow::Error;

    fn try_from(map: &serde_json::Map<String, serde_json::Value>) -> Result<Self> {
        let local_dir = map
            .get("local_dir")
            .and_then(|v| v.as_str())
            .unwrap_or(DEFAULT_LOCAL_DIR);
        let local_dir = PathBuf::from(shellexpand::tilde(local_dir).into_owned());

        let permission = map
            .get("permission")
            .map(|v| serde_json::from_value(v.clone()))
            .transpose()
            .context("Invalid value for permission")?;

        Ok(Self {
            local_dir,
            permission,
        })
    }
}
