//! BootstrapUseCase: the state machine that takes a kiosk from power-on to a
//! browser showing the display server.
//!
//! # States
//!
//! ```text
//! Startup ──► CheckConnectivity ──connected──────────────► AcquireServerAddress
//!                    │                                            ▲   │
//!              not connected                                      │   ▼
//!                    ▼                                            │ AwaitReachable
//!               AcquireWifi ──► ConnectWifi ──verified────────────┘   │
//!                 ▲     │            │                                ▼
//!                 └─bad─┘         failed ──► WifiNotConnected       Launch
//! ```
//!
//! The three acquisition loops (Wi-Fi code, server code, reachability) never
//! give up on their own.  The device has no other input than the camera, so
//! "not yet" is the only answer they can give; the loops end when they
//! succeed or when the [`CancelToken`] fires.  Closing the scanner preview
//! ([`ScanAttempt::Quit`]) counts as "not yet" and the prompt is shown again;
//! only a shutdown signal fires the token.
//!
//! A verified Wi-Fi association failure ends the run with
//! [`BootstrapOutcome::WifiNotConnected`] instead of asking for another code.
//!
//! # Architecture
//!
//! This use case depends only on the traits in [`crate::application::ports`]
//! and on `kiosk_core` domain types.  All infrastructure is injected through
//! [`Collaborators`], so every path is unit-testable with in-memory doubles
//! and a paused tokio clock.

use std::sync::Arc;
use std::time::Duration;

use kiosk_core::{
    is_visible, parse_wifi_credential, AddressStrategy, ScanAttempt, ServerAddress, WifiCredential,
};
use thiserror::Error;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::application::cancel::CancelToken;
use crate::application::connectivity::{has_network_connection, DEFAULT_INTERFACES};
use crate::application::ports::{
    LaunchError, Launcher, NetworkStatusProbe, QrReader, ReachabilityProbe, WifiController,
};

/// Delay before the first connectivity check, giving OS services time to start.
pub const DEFAULT_STARTUP_DELAY: Duration = Duration::from_secs(60);

/// Wait between reachability probes (and after a QR reader failure).
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(3);

/// Prompt shown while waiting for the Wi-Fi QR code.
pub const DEFAULT_WIFI_PROMPT: &str = "Present Wi-Fi QR code";

/// Prompt shown while waiting for the server-address QR code.
pub const DEFAULT_SERVER_PROMPT: &str = "Present server-address QR code";

/// Everything the state machine needs to know that is not a collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapConfig {
    /// Interfaces inspected by the connectivity check, in order.
    pub interfaces: Vec<String>,
    /// Delay before the first connectivity check.
    pub startup_delay: Duration,
    /// Wait between reachability probes and after QR reader failures.
    pub retry_interval: Duration,
    /// How the server address is extracted from its QR code.
    pub address_strategy: AddressStrategy,
    /// Prompt for the Wi-Fi QR code.
    pub wifi_prompt: String,
    /// Prompt for the server-address QR code.
    pub server_prompt: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            interfaces: DEFAULT_INTERFACES.iter().map(|s| s.to_string()).collect(),
            startup_delay: DEFAULT_STARTUP_DELAY,
            retry_interval: DEFAULT_RETRY_INTERVAL,
            address_strategy: AddressStrategy::default(),
            wifi_prompt: DEFAULT_WIFI_PROMPT.to_string(),
            server_prompt: DEFAULT_SERVER_PROMPT.to_string(),
        }
    }
}

/// The external capabilities the state machine drives.
#[derive(Clone)]
pub struct Collaborators {
    pub qr_reader: Arc<dyn QrReader>,
    pub network_status: Arc<dyn NetworkStatusProbe>,
    pub wifi: Arc<dyn WifiController>,
    pub reachability: Arc<dyn ReachabilityProbe>,
    pub launcher: Arc<dyn Launcher>,
}

/// The states of a bootstrap run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapState {
    Startup,
    CheckConnectivity,
    AcquireWifi,
    ConnectWifi(WifiCredential),
    AcquireServerAddress,
    AwaitReachable(ServerAddress),
    Launch(ServerAddress),
}

impl BootstrapState {
    /// Short name for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            BootstrapState::Startup => "startup",
            BootstrapState::CheckConnectivity => "check-connectivity",
            BootstrapState::AcquireWifi => "acquire-wifi",
            BootstrapState::ConnectWifi(_) => "connect-wifi",
            BootstrapState::AcquireServerAddress => "acquire-server-address",
            BootstrapState::AwaitReachable(_) => "await-reachable",
            BootstrapState::Launch(_) => "launch",
        }
    }
}

/// How a bootstrap run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The browser was started on this address.
    LaunchedAt(ServerAddress),
    /// Association with the scanned network could not be verified.
    WifiNotConnected { ssid: String },
    /// The cancel token fired before the browser was launched.
    Cancelled,
}

/// Error type for the bootstrap use case.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("browser launch failed: {0}")]
    Launch(#[from] LaunchError),
}

/// Result of asking the QR reader for one code.
enum ScanStep {
    Text(String),
    Retry,
    Cancelled,
}

/// The Bootstrap use case.
pub struct BootstrapUseCase {
    config: BootstrapConfig,
    ports: Collaborators,
    cancel: CancelToken,
}

impl BootstrapUseCase {
    /// Creates a use case over the given collaborators.
    pub fn new(config: BootstrapConfig, ports: Collaborators, cancel: CancelToken) -> Self {
        Self {
            config,
            ports,
            cancel,
        }
    }

    /// The configuration this use case runs with.
    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Runs the whole bootstrap sequence once.
    ///
    /// Log lines emitted during the run carry a fresh `run_id`.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::Launch`] if the browser cannot be started.
    /// Every other failure is retried or reported through [`BootstrapOutcome`].
    pub async fn run(&self) -> Result<BootstrapOutcome, BootstrapError> {
        let run_id = Uuid::new_v4();
        self.run_state_machine()
            .instrument(info_span!("bootstrap", %run_id))
            .await
    }

    async fn run_state_machine(&self) -> Result<BootstrapOutcome, BootstrapError> {
        let mut state = BootstrapState::Startup;

        loop {
            if self.cancel.is_cancelled() {
                info!(state = state.name(), "bootstrap cancelled");
                return Ok(BootstrapOutcome::Cancelled);
            }
            info!(state = state.name(), "entering state");

            state = match state {
                BootstrapState::Startup => {
                    debug!(delay = ?self.config.startup_delay, "waiting for OS services");
                    if !self.pause(self.config.startup_delay).await {
                        return Ok(BootstrapOutcome::Cancelled);
                    }
                    BootstrapState::CheckConnectivity
                }

                BootstrapState::CheckConnectivity => {
                    let connected = has_network_connection(
                        self.ports.network_status.as_ref(),
                        &self.config.interfaces,
                    )
                    .await;
                    if connected {
                        BootstrapState::AcquireServerAddress
                    } else {
                        BootstrapState::AcquireWifi
                    }
                }

                BootstrapState::AcquireWifi => match self.acquire_wifi().await {
                    Some(credential) => BootstrapState::ConnectWifi(credential),
                    None => return Ok(BootstrapOutcome::Cancelled),
                },

                BootstrapState::ConnectWifi(credential) => {
                    if self.connect_wifi(&credential).await {
                        BootstrapState::AcquireServerAddress
                    } else {
                        warn!(ssid = credential.ssid(), "Wi-Fi connection failed; ending run");
                        return Ok(BootstrapOutcome::WifiNotConnected {
                            ssid: credential.ssid().to_string(),
                        });
                    }
                }

                BootstrapState::AcquireServerAddress => match self.acquire_server_address().await {
                    Some(address) => BootstrapState::AwaitReachable(address),
                    None => return Ok(BootstrapOutcome::Cancelled),
                },

                BootstrapState::AwaitReachable(address) => {
                    if self.await_reachable(&address).await {
                        BootstrapState::Launch(address)
                    } else {
                        return Ok(BootstrapOutcome::Cancelled);
                    }
                }

                BootstrapState::Launch(address) => {
                    self.ports.launcher.open(&address).await?;
                    info!(url = %address.url(), "browser launched");
                    return Ok(BootstrapOutcome::LaunchedAt(address));
                }
            };
        }
    }

    /// Connects to the network in `credential` and verifies the association.
    ///
    /// Returns `true` only if the network is visible, the association request
    /// is accepted, and the radio then reports exactly that SSID.  The network
    /// list is scanned once; an invisible network is a failed connection.
    pub async fn connect_wifi(&self, credential: &WifiCredential) -> bool {
        let ssid = credential.ssid();

        let networks = match self.ports.wifi.list_visible_networks().await {
            Ok(networks) => networks,
            Err(e) => {
                warn!(ssid, "Wi-Fi scan unavailable: {e}");
                return false;
            }
        };
        if !is_visible(&networks, ssid) {
            warn!(ssid, visible = networks.len(), "network not visible");
            return false;
        }

        if let Err(e) = self.ports.wifi.associate(credential).await {
            warn!(ssid, "association request failed: {e}");
            return false;
        }

        match self.ports.wifi.current_network().await {
            Ok(Some(current)) if current == ssid => {
                info!(ssid, "Wi-Fi association verified");
                true
            }
            Ok(current) => {
                warn!(ssid, ?current, "associated network does not match requested SSID");
                false
            }
            Err(e) => {
                warn!(ssid, "could not verify Wi-Fi association: {e}");
                false
            }
        }
    }

    /// Scans until a valid Wi-Fi credential is read.  `None` means cancelled.
    async fn acquire_wifi(&self) -> Option<WifiCredential> {
        loop {
            if self.cancel.is_cancelled() {
                return None;
            }
            match self.scan_once(&self.config.wifi_prompt).await {
                ScanStep::Cancelled => return None,
                ScanStep::Retry => {}
                // The payload holds a password, so the raw text is not logged.
                ScanStep::Text(text) => match parse_wifi_credential(&text) {
                    Ok(credential) => {
                        info!(ssid = credential.ssid(), "Wi-Fi credential accepted");
                        return Some(credential);
                    }
                    Err(e) => info!("scanned code is not a Wi-Fi credential: {e}"),
                },
            }
        }
    }

    /// Scans until a server address is read.  `None` means cancelled.
    async fn acquire_server_address(&self) -> Option<ServerAddress> {
        loop {
            if self.cancel.is_cancelled() {
                return None;
            }
            match self.scan_once(&self.config.server_prompt).await {
                ScanStep::Cancelled => return None,
                ScanStep::Retry => {}
                ScanStep::Text(text) => match self.config.address_strategy.extract(&text) {
                    Ok(address) => {
                        info!(%address, "server address accepted");
                        return Some(address);
                    }
                    // A stray Wi-Fi code lands here, so the raw text is not logged.
                    Err(e) => info!(
                        payload_len = text.len(),
                        "scanned code is not a server address: {e}"
                    ),
                },
            }
        }
    }

    /// Probes `address` until it answers.  `false` means cancelled.
    async fn await_reachable(&self, address: &ServerAddress) -> bool {
        loop {
            if self.cancel.is_cancelled() {
                return false;
            }
            let result = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return false,
                result = self.ports.reachability.probe(address) => result,
            };
            match result {
                Ok(()) => {
                    info!(url = %address.url(), "server reachable");
                    return true;
                }
                Err(e) => info!(retry_in = ?self.config.retry_interval, "{e}"),
            }
            if !self.pause(self.config.retry_interval).await {
                return false;
            }
        }
    }

    /// Asks the QR reader for one code, racing the cancel token.
    async fn scan_once(&self, prompt: &str) -> ScanStep {
        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return ScanStep::Cancelled,
            result = self.ports.qr_reader.scan(prompt) => result,
        };

        match result {
            Ok(ScanAttempt::Decoded(text)) => ScanStep::Text(text),
            Ok(ScanAttempt::NothingDecoded) => {
                debug!("no QR code decoded");
                ScanStep::Retry
            }
            Ok(ScanAttempt::Quit) => {
                info!("scanner preview closed by operator; asking again");
                ScanStep::Retry
            }
            Err(e) => {
                warn!("QR reader unavailable: {e}");
                if self.pause(self.config.retry_interval).await {
                    ScanStep::Retry
                } else {
                    ScanStep::Cancelled
                }
            }
        }
    }

    /// Sleeps for `duration`.  Returns `false` if cancelled first.
    async fn pause(&self, duration: Duration) -> bool {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => false,
            _ = tokio::time::sleep(duration) => true,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
