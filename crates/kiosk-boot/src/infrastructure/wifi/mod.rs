//! Wi-Fi controller adapters.

pub mod mock;
pub mod nmcli;

pub use nmcli::NmcliWifiController;
