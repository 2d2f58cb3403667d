//! Recording launcher for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use kiosk_core::ServerAddress;

use crate::application::ports::{LaunchError, Launcher};

/// A launcher that records every address instead of starting a browser.
#[derive(Default)]
pub struct RecordingLauncher {
    /// Addresses passed to `open`, in call order.
    pub opened: Mutex<Vec<ServerAddress>>,
    /// When `true`, `open` fails as if the browser binary were missing.
    pub should_fail: bool,
}

impl RecordingLauncher {
    /// Creates a launcher that succeeds.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Launcher for RecordingLauncher {
    async fn open(&self, address: &ServerAddress) -> Result<(), LaunchError> {
        if self.should_fail {
            return Err(LaunchError::Spawn {
                command: "browser".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "mock failure"),
            });
        }
        self.opened.lock().unwrap().push(address.clone());
        Ok(())
    }
}
