//! Infrastructure layer for the bootstrap daemon.
//!
//! Contains the OS-facing adapters behind the ports in
//! [`crate::application::ports`], plus configuration file loading.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `kiosk_core`, but MUST NOT be imported by the `application` or domain
//! layers (test modules excepted).
//!
//! # Sub-modules
//!
//! - **`qr_reader`** – runs `zbarcam` once per scan and reads the decoded
//!   text from its standard output.
//!
//! - **`network_status`** – asks `ip -o addr show dev <iface>` which addresses
//!   an interface holds.
//!
//! - **`wifi`** – scans, associates, and verifies through NetworkManager's
//!   `nmcli` in terse mode.
//!
//! - **`reachability`** – one HTTP GET per probe via `reqwest`.
//!
//! - **`launcher`** – starts the kiosk browser as a detached child process.
//!
//! - **`storage`** – TOML configuration file.
//!
//! Every adapter module except `storage` also has an always-compiled `mock`
//! sub-module with an in-memory double used by the tests.

pub mod launcher;
pub mod network_status;
pub mod qr_reader;
pub mod reachability;
pub mod storage;
pub mod wifi;
