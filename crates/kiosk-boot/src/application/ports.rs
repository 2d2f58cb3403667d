//! Ports: the traits through which the orchestrator reaches the outside world.
//!
//! Each trait is implemented by an OS adapter in the infrastructure layer and
//! by an in-memory double for tests.  All methods return typed errors instead
//! of swallowing failures; the orchestrator decides whether an error is worth
//! a warning, but it never treats one as fatal except for the launcher.

use async_trait::async_trait;
use kiosk_core::{ScanAttempt, ServerAddress, VisibleNetwork, WifiCredential};
use thiserror::Error;

// ── Errors ────────────────────────────────────────────────────────────────────

/// Error type for QR reader operations.
#[derive(Debug, Error)]
pub enum QrReaderError {
    /// The scanner process could not be started (binary missing, permissions).
    #[error("failed to start QR scanner `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    /// The scanner started but could not open the camera.
    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),
    /// Reading the scanner's output failed.
    #[error("scanner I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type for network status queries.
#[derive(Debug, Error)]
pub enum NetworkProbeError {
    /// The named interface does not exist on this device.
    #[error("no such interface: {0}")]
    NoSuchInterface(String),
    /// The OS tool used to inspect interfaces could not be run.
    #[error("failed to run `{command}`: {source}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
    /// The OS tool ran but reported an error.
    #[error("interface query failed: {0}")]
    QueryFailed(String),
}

/// Error type for Wi-Fi controller operations.
#[derive(Debug, Error)]
pub enum WifiError {
    /// The Wi-Fi tool could not be run.
    #[error("failed to run `{command}`: {source}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
    /// The Wi-Fi tool ran but refused the request.
    #[error("wifi request rejected: {0}")]
    Rejected(String),
}

/// Why a reachability probe did not get a response.
#[derive(Debug, Error)]
pub enum ReachabilityError {
    /// The request failed at the connection or protocol level.
    #[error("{url} unreachable: {reason}")]
    Unreachable { url: String, reason: String },
}

/// Error type for launching the browser.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The browser process could not be started.
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

// ── Ports ─────────────────────────────────────────────────────────────────────

/// Reads one QR code from the camera.
///
/// A single call owns the camera for its whole duration and releases it
/// before returning, including when the future is dropped mid-scan.
#[async_trait]
pub trait QrReader: Send + Sync {
    /// Shows `prompt` to the operator and waits for one decoded code.
    ///
    /// How the prompt is shown is up to the adapter.  `ZbarQrReader` cannot
    /// draw over zbarcam's preview window, so it only writes the prompt to
    /// the log.
    ///
    /// Returns [`ScanAttempt::Quit`] when the operator closes the preview.
    /// Nothing was acquired and the caller may ask again.
    ///
    /// # Errors
    ///
    /// Returns [`QrReaderError`] if the scanner or camera is unavailable.
    async fn scan(&self, prompt: &str) -> Result<ScanAttempt, QrReaderError>;
}

/// Reports the addresses currently held by a network interface.
#[async_trait]
pub trait NetworkStatusProbe: Send + Sync {
    /// Returns every address on `interface` as the OS reports it, without the
    /// prefix length (`"192.168.1.20"`, `"fe80::1"`).
    ///
    /// # Errors
    ///
    /// Returns [`NetworkProbeError::NoSuchInterface`] when the interface does
    /// not exist, or another variant when the query itself fails.
    async fn interface_addresses(&self, interface: &str) -> Result<Vec<String>, NetworkProbeError>;
}

/// Scans for and associates with Wi-Fi networks.
#[async_trait]
pub trait WifiController: Send + Sync {
    /// Lists the networks currently visible to the radio.
    async fn list_visible_networks(&self) -> Result<Vec<VisibleNetwork>, WifiError>;

    /// Returns the SSID of the associated network, or `None` when not associated.
    async fn current_network(&self) -> Result<Option<String>, WifiError>;

    /// Asks the OS to associate with the network described by `credential`.
    ///
    /// Success here means the OS accepted the request; the caller still has
    /// to verify the associated network afterwards.
    async fn associate(&self, credential: &WifiCredential) -> Result<(), WifiError>;
}

/// Checks whether a server answers requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    /// Issues a single best-effort request to `address`.
    ///
    /// Any response, including an HTTP error status, counts as reachable.
    ///
    /// # Errors
    ///
    /// Returns [`ReachabilityError::Unreachable`] on connection or protocol
    /// failure.
    async fn probe(&self, address: &ServerAddress) -> Result<(), ReachabilityError>;

    /// Boolean form of [`probe`](Self::probe).
    async fn reachable(&self, address: &ServerAddress) -> bool {
        self.probe(address).await.is_ok()
    }
}

/// Starts the kiosk browser.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Launcher: Send + Sync {
    /// Starts the browser on `address` without waiting for it to exit.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError`] if the process cannot be started.
    async fn open(&self, address: &ServerAddress) -> Result<(), LaunchError>;
}
