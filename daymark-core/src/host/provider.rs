//! Host subprocess protocol.
//!
//! This module handles communication with external host binaries
//! (e.g., `daymark-provider-local`) using JSON over stdin/stdout.
//!
//! Any executable that speaks the JSON protocol can be a host. Hosts own
//! their storage and permission model; daymark only passes the provider
//! parameters from its config file along with each request.

use crate::error::{DaymarkError, DaymarkResult};
use crate::host::protocol::{Command, HostCommand, Request, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);
/// Permission requests may wait on the user.
const PERMISSION_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Provider(String);

impl Provider {
    pub fn from_name(name: &str) -> Self {
        Provider(name.to_string())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn binary_name(&self) -> String {
        format!("daymark-provider-{}", self.name())
    }

    fn binary_path(&self) -> DaymarkResult<std::path::PathBuf> {
        let binary_name = self.binary_name();
        which::which(&binary_name).map_err(|_| {
            DaymarkError::ProviderNotInstalled(format!(
                "Provider '{}' not found. Install it with:\n  cargo install {}",
                self.name(),
                binary_name
            ))
        })
    }

    /// Call a typed host command and return the result.
    ///
    /// The response type is inferred from the command's associated type.
    pub async fn call<C: HostCommand>(&self, cmd: C) -> DaymarkResult<C::Response> {
        self.call_with_timeout(cmd, PROVIDER_TIMEOUT).await
    }

    /// Call with the longer timeout used for interactive commands.
    pub async fn call_interactive<C: HostCommand>(&self, cmd: C) -> DaymarkResult<C::Response> {
        self.call_with_timeout(cmd, PERMISSION_TIMEOUT).await
    }

    async fn call_with_timeout<C: HostCommand>(
        &self,
        cmd: C,
        limit: Duration,
    ) -> DaymarkResult<C::Response> {
        timeout(limit, self.call_raw(C::command(), cmd))
            .await
            .map_err(|_| DaymarkError::ProviderTimeout(limit.as_secs()))?
    }

    /// Low-level call that sends a command with params and deserializes the response.
    async fn call_raw<P: Serialize, R: serde::de::DeserializeOwned>(
        &self,
        command: Command,
        params: P,
    ) -> DaymarkResult<R> {
        let params = serde_json::to_value(params)
            .map_err(|e| DaymarkError::Serialization(e.to_string()))?;
        let request = Request { command, params };
        let request_json = serde_json::to_string(&request)
            .map_err(|e| DaymarkError::Serialization(e.to_string()))?;

        let binary_path = self.binary_path()?;
        tracing::debug!(provider = self.name(), ?command, "calling provider");

        let mut child = TokioCommand::new(&binary_path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                DaymarkError::Provider(format!("Failed to spawn {}: {}", binary_path.display(), e))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| DaymarkError::Provider("Provider stdin unavailable".into()))?;
        stdin
            .write_all(format!("{request_json}\n").as_bytes())
            .await?;
        drop(stdin);

        let output = child.wait_with_output().await?;

        if !output.status.success() {
            return Err(DaymarkError::Provider(format!(
                "Provider exited with status: {}",
                output.status.code().unwrap_or(-1)
            )));
        }

        let response_str = String::from_utf8_lossy(&output.stdout);
        if response_str.trim().is_empty() {
            return Err(DaymarkError::Provider("Provider returned no response".into()));
        }

        let response: Response<R> = serde_json::from_str(&response_str)
            .map_err(|e| DaymarkError::Provider(format!("Failed to parse response: {}", e)))?;

        match response {
            Response::Success { data } => Ok(data),
            Response::Error { error } => Err(DaymarkError::Provider(error)),
        }
    }
}
