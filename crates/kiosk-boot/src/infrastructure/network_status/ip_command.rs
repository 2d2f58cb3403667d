//! Network status probe that shells out to iproute2's `ip`.
//!
//! `ip -o addr show dev <iface>` prints one line per address:
//!
//! ```text
//! 3: wlan0    inet 192.168.1.20/24 brd 192.168.1.255 scope global dynamic wlan0\       valid_lft 86391sec ...
//! 3: wlan0    inet6 fe80::1c2b:3ff:fe4d:5e6f/64 scope link \       valid_lft forever ...
//! ```
//!
//! The token after `inet`/`inet6` is the address with its prefix length; the
//! prefix is stripped before the address is returned.  An unknown interface
//! makes `ip` exit non-zero with `Device "<iface>" does not exist.`

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{NetworkProbeError, NetworkStatusProbe};

const IP_COMMAND: &str = "ip";

/// Probe that runs `ip -o addr show dev <iface>` on every query.
#[derive(Debug, Clone)]
pub struct IpCommandProbe {
    command: String,
}

impl IpCommandProbe {
    /// Creates a probe using the `ip` binary on `PATH`.
    pub fn new() -> Self {
        Self {
            command: IP_COMMAND.to_string(),
        }
    }
}

impl Default for IpCommandProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NetworkStatusProbe for IpCommandProbe {
    async fn interface_addresses(&self, interface: &str) -> Result<Vec<String>, NetworkProbeError> {
        let output = Command::new(&self.command)
            .args(["-o", "addr", "show", "dev", interface])
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| NetworkProbeError::CommandFailed {
                command: format!("{} -o addr show dev {interface}", self.command),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("does not exist") {
                return Err(NetworkProbeError::NoSuchInterface(interface.to_string()));
            }
            return Err(NetworkProbeError::QueryFailed(format!(
                "ip exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(parse_ip_addr_output(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Extracts every `inet`/`inet6` address from `ip -o addr` output, prefix
/// length removed, in output order.
pub fn parse_ip_addr_output(output: &str) -> Vec<String> {
    let mut addresses = Vec::new();
    for line in output.lines() {
        let mut tokens = line.split_whitespace();
        while let Some(token) = tokens.next() {
            if token == "inet" || token == "inet6" {
                if let Some(cidr) = tokens.next() {
                    let addr = cidr.split('/').next().unwrap_or(cidr);
                    addresses.push(addr.to_string());
                }
                break;
            }
        }
    }
    addresses
}

#[cfg(test)]
mod tests {
    use super::*;

    const WLAN0: &str = "\
3: wlan0    inet 192.168.1.20/24 brd 192.168.1.255 scope global dynamic noprefixroute wlan0\\       valid_lft 86391sec preferred_lft 86391sec
3: wlan0    inet6 fe80::1c2b:3ff:fe4d:5e6f/64 scope link \\       valid_lft forever preferred_lft forever
";

    #[test]
    fn test_parse_returns_ipv4_and_ipv6_without_prefix() {
        assert_eq!(
            parse_ip_addr_output(WLAN0),
            vec!["192.168.1.20".to_string(), "fe80::1c2b:3ff:fe4d:5e6f".to_string()]
        );
    }

    #[test]
    fn test_parse_interface_without_addresses_is_empty() {
        assert!(parse_ip_addr_output("").is_empty());
    }

    #[test]
    fn test_parse_ignores_link_lines() {
        let output = "2: eth0: <NO-CARRIER,BROADCAST,MULTICAST,UP> mtu 1500 qdisc fq_codel state DOWN\n";
        assert!(parse_ip_addr_output(output).is_empty());
    }

    #[test]
    fn test_parse_multiple_ipv4_addresses_in_order() {
        let output = "\
2: eth0    inet 10.0.0.2/8 scope global eth0\\ valid_lft forever
2: eth0    inet 10.0.0.3/8 scope global secondary eth0\\ valid_lft forever
";
        assert_eq!(parse_ip_addr_output(output), vec!["10.0.0.2", "10.0.0.3"]);
    }
}
