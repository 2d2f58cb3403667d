//! Connectivity check: does any configured interface hold a usable IPv4 address?
//!
//! The answer is derived fresh on every call and never cached.  Interfaces are
//! checked in the configured order; the order only decides which interface is
//! reported as "found first" in the log, never the boolean result.

use std::net::Ipv4Addr;

use tracing::{debug, info, warn};

use crate::application::ports::{NetworkProbeError, NetworkStatusProbe};

/// Interfaces checked when the configuration does not override them.
pub const DEFAULT_INTERFACES: [&str; 3] = ["eth0", "en0", "wlan0"];

/// Returns `true` if any of `interfaces` currently holds a routable IPv4 address.
///
/// Probe errors are logged and the affected interface counts as having no
/// address; they never abort the check.
pub async fn has_network_connection(probe: &dyn NetworkStatusProbe, interfaces: &[String]) -> bool {
    match first_connected_interface(probe, interfaces).await {
        Some((interface, addr)) => {
            info!(%interface, %addr, "network connection present");
            true
        }
        None => {
            info!(?interfaces, "no interface holds an IPv4 address");
            false
        }
    }
}

/// Returns the first interface in `interfaces` holding a routable IPv4
/// address, together with that address.
pub async fn first_connected_interface(
    probe: &dyn NetworkStatusProbe,
    interfaces: &[String],
) -> Option<(String, Ipv4Addr)> {
    for interface in interfaces {
        match probe.interface_addresses(interface).await {
            Ok(addresses) => {
                if let Some(addr) = addresses.iter().find_map(|a| routable_ipv4(a)) {
                    return Some((interface.clone(), addr));
                }
                debug!(%interface, ?addresses, "interface has no routable IPv4 address");
            }
            Err(NetworkProbeError::NoSuchInterface(_)) => {
                debug!(%interface, "interface not present");
            }
            Err(e) => {
                warn!(%interface, "network status probe unavailable: {e}");
            }
        }
    }
    None
}

/// Parses `raw` as an IPv4 address a DHCP or static configuration would hand
/// out.
///
/// Loopback, unspecified (`0.0.0.0`), and link-local (`169.254/16`, assigned
/// when DHCP fails) addresses do not count.
fn routable_ipv4(raw: &str) -> Option<Ipv4Addr> {
    let addr: Ipv4Addr = raw.trim().parse().ok()?;
    if addr.is_loopback() || addr.is_unspecified() || addr.is_link_local() {
        return None;
    }
    Some(addr)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::network_status::mock::StaticNetworkStatus;

    fn default_interfaces() -> Vec<String> {
        DEFAULT_INTERFACES.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_wlan0_with_ipv4_is_connected() {
        // Arrange
        let probe = StaticNetworkStatus::new().with_interface("wlan0", &["192.168.1.20"]);

        // Act
        let connected = has_network_connection(&probe, &default_interfaces()).await;

        // Assert
        assert!(connected);
    }

    #[tokio::test]
    async fn test_no_interfaces_is_not_connected() {
        let probe = StaticNetworkStatus::new();
        assert!(!has_network_connection(&probe, &default_interfaces()).await);
    }

    #[tokio::test]
    async fn test_only_non_ipv4_data_is_not_connected() {
        // Arrange
        let probe = StaticNetworkStatus::new()
            .with_interface("eth0", &["fe80::1c2b:3ff:fe4d:5e6f"])
            .with_interface("wlan0", &["not-an-address", ""]);

        // Act / Assert
        assert!(!has_network_connection(&probe, &default_interfaces()).await);
    }

    #[tokio::test]
    async fn test_link_local_and_loopback_are_not_routable() {
        let probe = StaticNetworkStatus::new()
            .with_interface("eth0", &["169.254.12.7"])
            .with_interface("wlan0", &["127.0.0.1", "0.0.0.0"]);
        assert!(!has_network_connection(&probe, &default_interfaces()).await);
    }

    #[tokio::test]
    async fn test_first_connected_interface_follows_configured_order() {
        // Arrange
        let probe = StaticNetworkStatus::new()
            .with_interface("eth0", &["10.0.0.2"])
            .with_interface("wlan0", &["192.168.1.20"]);

        // Act
        let found = first_connected_interface(&probe, &default_interfaces()).await;

        // Assert
        assert_eq!(found, Some(("eth0".to_string(), Ipv4Addr::new(10, 0, 0, 2))));
    }

    #[tokio::test]
    async fn test_probe_failure_on_one_interface_does_not_hide_another() {
        let probe = StaticNetworkStatus::new()
            .with_failing_interface("eth0")
            .with_interface("wlan0", &["192.168.1.20"]);
        assert!(has_network_connection(&probe, &default_interfaces()).await);
    }

    #[tokio::test]
    async fn test_every_configured_interface_is_queried_when_none_connected() {
        // Arrange
        let probe = StaticNetworkStatus::new();

        // Act
        has_network_connection(&probe, &default_interfaces()).await;

        // Assert
        assert_eq!(*probe.queries.lock().unwrap(), default_interfaces());
    }

    #[test]
    fn test_routable_ipv4_accepts_private_ranges() {
        assert_eq!(routable_ipv4("192.168.1.20"), Some(Ipv4Addr::new(192, 168, 1, 20)));
        assert_eq!(routable_ipv4(" 10.0.0.5 "), Some(Ipv4Addr::new(10, 0, 0, 5)));
    }
}
