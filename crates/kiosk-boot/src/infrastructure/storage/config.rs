//! TOML-based configuration for the bootstrap daemon.
//!
//! The file is looked up in this order:
//!
//! 1. `$KIOSK_BOOT_CONFIG`, when set.
//! 2. `$XDG_CONFIG_HOME/kiosk-boot/config.toml` (or
//!    `~/.config/kiosk-boot/config.toml`), when that file exists.
//! 3. `/etc/kiosk-boot/config.toml`, installed by the Debian package.
//!
//! A missing file is not an error: every field has a default, so the daemon
//! runs with the built-in settings.
//!
//! ```toml
//! [bootstrap]
//! startup_delay_secs = 60
//! retry_interval_secs = 3
//! log_level = "info"
//!
//! [network]
//! interfaces = ["eth0", "en0", "wlan0"]
//! wifi_interface = "wlan0"
//!
//! [qr]
//! scanner_command = "zbarcam"
//! video_device = "/dev/video0"
//!
//! [qr.address]
//! strategy = "prefixed"
//! marker = "lava="
//!
//! [reachability]
//! request_timeout_secs = 5
//!
//! [browser]
//! command = "chromium-browser"
//! args = ["--kiosk", "--noerrdialogs", "--disable-infobars"]
//! ```
//!
//! # Serde default values
//!
//! Fields annotated with `#[serde(default = "some_fn")]` use the return value
//! of `some_fn()` when the field is absent from the TOML file, and whole
//! sections marked `#[serde(default)]` may be left out entirely.  A partial
//! file therefore only needs the settings that differ from the defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use kiosk_core::{AddressStrategy, DEFAULT_ADDRESS_MARKER};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::bootstrap::{
    BootstrapConfig, DEFAULT_RETRY_INTERVAL, DEFAULT_SERVER_PROMPT, DEFAULT_STARTUP_DELAY,
    DEFAULT_WIFI_PROMPT,
};
use crate::application::connectivity::DEFAULT_INTERFACES;
use crate::infrastructure::launcher::command::{DEFAULT_BROWSER_ARGS, DEFAULT_BROWSER_COMMAND};
use crate::infrastructure::qr_reader::zbar::{DEFAULT_SCANNER_COMMAND, DEFAULT_VIDEO_DEVICE};
use crate::infrastructure::reachability::http::DEFAULT_REQUEST_TIMEOUT;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "KIOSK_BOOT_CONFIG";

/// System-wide config file installed by the package.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/kiosk-boot/config.toml";

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The file parsed but a value is unusable.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub bootstrap: BootstrapSettings,
    #[serde(default)]
    pub network: NetworkSettings,
    #[serde(default)]
    pub qr: QrSettings,
    #[serde(default)]
    pub reachability: ReachabilitySettings,
    #[serde(default)]
    pub browser: BrowserSettings,
}

/// Timing and logging.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BootstrapSettings {
    /// Seconds to wait after start before the first connectivity check.
    #[serde(default = "default_startup_delay_secs")]
    pub startup_delay_secs: u64,
    /// Seconds between reachability probes.
    #[serde(default = "default_retry_interval_secs")]
    pub retry_interval_secs: u64,
    /// `tracing` level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Interfaces inspected by the connectivity check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkSettings {
    #[serde(default = "default_interfaces")]
    pub interfaces: Vec<String>,
    /// Radio used for Wi-Fi association; NetworkManager picks when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wifi_interface: Option<String>,
}

/// Scanner and payload settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QrSettings {
    #[serde(default = "default_scanner_command")]
    pub scanner_command: String,
    #[serde(default = "default_video_device")]
    pub video_device: String,
    #[serde(default = "default_wifi_prompt")]
    pub wifi_prompt: String,
    #[serde(default = "default_server_prompt")]
    pub server_prompt: String,
    /// How the server address is read from its QR code.
    #[serde(default)]
    pub address: AddressStrategy,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReachabilitySettings {
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// The kiosk browser.  The server URL is appended after `args`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrowserSettings {
    #[serde(default = "default_browser_command")]
    pub command: String,
    #[serde(default = "default_browser_args")]
    pub args: Vec<String>,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_startup_delay_secs() -> u64 {
    DEFAULT_STARTUP_DELAY.as_secs()
}
fn default_retry_interval_secs() -> u64 {
    DEFAULT_RETRY_INTERVAL.as_secs()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_interfaces() -> Vec<String> {
    DEFAULT_INTERFACES.iter().map(|s| s.to_string()).collect()
}
fn default_scanner_command() -> String {
    DEFAULT_SCANNER_COMMAND.to_string()
}
fn default_video_device() -> String {
    DEFAULT_VIDEO_DEVICE.to_string()
}
fn default_wifi_prompt() -> String {
    DEFAULT_WIFI_PROMPT.to_string()
}
fn default_server_prompt() -> String {
    DEFAULT_SERVER_PROMPT.to_string()
}
fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs()
}
fn default_browser_command() -> String {
    DEFAULT_BROWSER_COMMAND.to_string()
}
fn default_browser_args() -> Vec<String> {
    DEFAULT_BROWSER_ARGS.iter().map(|s| s.to_string()).collect()
}

impl Default for BootstrapSettings {
    fn default() -> Self {
        Self {
            startup_delay_secs: default_startup_delay_secs(),
            retry_interval_secs: default_retry_interval_secs(),
            log_level: default_log_level(),
        }
    }
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            interfaces: default_interfaces(),
            wifi_interface: None,
        }
    }
}

impl Default for QrSettings {
    fn default() -> Self {
        Self {
            scanner_command: default_scanner_command(),
            video_device: default_video_device(),
            wifi_prompt: default_wifi_prompt(),
            server_prompt: default_server_prompt(),
            address: AddressStrategy::default(),
        }
    }
}

impl Default for ReachabilitySettings {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            command: default_browser_command(),
            args: default_browser_args(),
        }
    }
}

impl AppConfig {
    /// Settings for the orchestrator.
    pub fn bootstrap_config(&self) -> BootstrapConfig {
        BootstrapConfig {
            interfaces: self.network.interfaces.clone(),
            startup_delay: Duration::from_secs(self.bootstrap.startup_delay_secs),
            retry_interval: Duration::from_secs(self.bootstrap.retry_interval_secs),
            address_strategy: self.qr.address.clone(),
            wifi_prompt: self.qr.wifi_prompt.clone(),
            server_prompt: self.qr.server_prompt.clone(),
        }
    }

    /// Per-request timeout for the reachability probe.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.reachability.request_timeout_secs)
    }

    /// Rejects values that would leave the daemon unable to make progress.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.network.interfaces.iter().all(|i| i.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "network.interfaces must name at least one interface".to_string(),
            ));
        }
        if self.bootstrap.retry_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "bootstrap.retry_interval_secs must be at least 1".to_string(),
            ));
        }
        if self.reachability.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "reachability.request_timeout_secs must be at least 1".to_string(),
            ));
        }
        if let AddressStrategy::Prefixed { marker } = &self.qr.address {
            if marker.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "qr.address.marker must not be empty (default \"{DEFAULT_ADDRESS_MARKER}\")"
                )));
            }
        }
        if self.qr.scanner_command.trim().is_empty() {
            return Err(ConfigError::Invalid("qr.scanner_command is empty".to_string()));
        }
        if self.browser.command.trim().is_empty() {
            return Err(ConfigError::Invalid("browser.command is empty".to_string()));
        }
        Ok(())
    }
}

// ── Config loading ────────────────────────────────────────────────────────────

/// Per-user config file location, if a home directory is known.
pub fn user_config_file() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
    Some(base.join("kiosk-boot").join("config.toml"))
}

/// Resolves the config file path from the environment.
pub fn config_file_path() -> PathBuf {
    resolve_config_path(
        std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from),
        user_config_file(),
    )
}

/// Picks the config file: explicit override, else an existing per-user file,
/// else the system-wide file.
pub fn resolve_config_path(explicit: Option<PathBuf>, user_file: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }
    match user_file {
        Some(path) if path.is_file() => path,
        _ => PathBuf::from(SYSTEM_CONFIG_PATH),
    }
}

/// Loads and validates the config from [`config_file_path`].
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<(AppConfig, PathBuf), ConfigError> {
    let path = config_file_path();
    let config = load_config_from(&path)?;
    Ok((config, path))
}

/// Loads and validates `AppConfig` from `path`, returning the defaults if the
/// file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// [`ConfigError::Parse`] if the TOML is malformed, and
/// [`ConfigError::Invalid`] if a value is unusable.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str::<AppConfig>(&content)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => AppConfig::default(),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    config.validate()?;
    Ok(config)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
