//! Launcher that starts the kiosk browser as a child process.
//!
//! The browser is started with the configured arguments followed by the
//! server URL and left running; the daemon does not wait for it or restart
//! it.

use std::process::Stdio;

use async_trait::async_trait;
use kiosk_core::ServerAddress;
use tokio::process::Command;
use tracing::info;

use crate::application::ports::{LaunchError, Launcher};

/// Default browser binary.
pub const DEFAULT_BROWSER_COMMAND: &str = "chromium-browser";

/// Default browser arguments: full-screen kiosk mode without crash bubbles.
pub const DEFAULT_BROWSER_ARGS: [&str; 3] = ["--kiosk", "--noerrdialogs", "--disable-infobars"];

/// Starts `command args... <url>`.
#[derive(Debug, Clone)]
pub struct CommandLauncher {
    command: String,
    args: Vec<String>,
}

impl CommandLauncher {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    /// Arguments the browser receives for `address`.
    pub fn arguments_for(&self, address: &ServerAddress) -> Vec<String> {
        let mut args = self.args.clone();
        args.push(address.url());
        args
    }
}

impl Default for CommandLauncher {
    fn default() -> Self {
        Self::new(
            DEFAULT_BROWSER_COMMAND,
            DEFAULT_BROWSER_ARGS.iter().map(|a| a.to_string()).collect(),
        )
    }
}

#[async_trait]
impl Launcher for CommandLauncher {
    async fn open(&self, address: &ServerAddress) -> Result<(), LaunchError> {
        let child = Command::new(&self.command)
            .args(self.arguments_for(address))
            .stdin(Stdio::null())
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        info!(command = %self.command, pid = ?child.id(), "browser started");
        Ok(())
    }
}
