//! Recording Wi-Fi controller for tests.
//!
//! Holds a fixed list of visible networks and simulates association: a
//! successful `associate` makes the requested SSID the current network unless
//! `associated_ssid_override` says the radio ended up somewhere else, which is
//! how tests provoke a post-connect verification failure.

use std::sync::Mutex;

use async_trait::async_trait;
use kiosk_core::{VisibleNetwork, WifiCredential};

use crate::application::ports::{WifiController, WifiError};

/// A Wi-Fi controller that records every call.
#[derive(Default)]
pub struct RecordingWifiController {
    /// Networks returned by `list_visible_networks`.
    pub visible: Vec<VisibleNetwork>,
    /// Currently associated SSID.
    pub current: Mutex<Option<String>>,
    /// When set, a successful association lands on this SSID instead of the
    /// requested one.
    pub associated_ssid_override: Option<String>,
    /// When `true`, `associate` returns [`WifiError::Rejected`].
    pub reject_association: bool,
    /// Credentials passed to `associate`, in call order.
    pub associations: Mutex<Vec<WifiCredential>>,
    /// Number of `list_visible_networks` calls.
    pub scans: Mutex<usize>,
}

impl RecordingWifiController {
    /// A controller that can see networks named `ssids`.
    pub fn seeing(ssids: &[&str]) -> Self {
        Self {
            visible: ssids
                .iter()
                .map(|ssid| VisibleNetwork {
                    ssid: ssid.to_string(),
                    security: "WPA2".to_string(),
                    signal: 80,
                })
                .collect(),
            ..Self::default()
        }
    }

    /// Number of `associate` calls so far.
    pub fn association_count(&self) -> usize {
        self.associations.lock().unwrap().len()
    }
}

#[async_trait]
impl WifiController for RecordingWifiController {
    async fn list_visible_networks(&self) -> Result<Vec<VisibleNetwork>, WifiError> {
        *self.scans.lock().unwrap() += 1;
        Ok(self.visible.clone())
    }

    async fn current_network(&self) -> Result<Option<String>, WifiError> {
        Ok(self.current.lock().unwrap().clone())
    }

    async fn associate(&self, credential: &WifiCredential) -> Result<(), WifiError> {
        self.associations.lock().unwrap().push(credential.clone());
        if self.reject_association {
            return Err(WifiError::Rejected("simulated rejection".to_string()));
        }
        let landed = self
            .associated_ssid_override
            .clone()
            .unwrap_or_else(|| credential.ssid().to_string());
        *self.current.lock().unwrap() = Some(landed);
        Ok(())
    }
}
