//! Server address token and the strategy used to pull it out of QR text.
//!
//! The final deployment encodes the server as `lava=<address>`; older
//! deployments printed a bare IPv4 address on the code.  A device is
//! configured for exactly one of the two formats through [`AddressStrategy`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::payload::{extract_ipv4_occurrences, parse_server_address, PayloadError};

/// Literal prefix that marks a server-address QR code.
pub const DEFAULT_ADDRESS_MARKER: &str = "lava=";

/// Opaque address of the server the kiosk browser should display.
///
/// The token is either a full URL (`https://host:8443/display`) or a bare
/// host / `host:port` pair.  It is always non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerAddress(String);

impl ServerAddress {
    /// Wraps a token, rejecting the empty string.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::EmptyAddress`] if `token` is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, PayloadError> {
        let token = token.into();
        if token.is_empty() {
            return Err(PayloadError::EmptyAddress);
        }
        Ok(Self(token))
    }

    /// The raw token exactly as it appeared in the QR payload.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The URL used for reachability probing and for the browser.
    ///
    /// Tokens that already carry a scheme are returned unchanged; bare
    /// addresses are assumed to be plain HTTP.
    pub fn url(&self) -> String {
        if self.0.contains("://") {
            self.0.clone()
        } else {
            format!("http://{}", self.0)
        }
    }
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a server address is extracted from a scanned QR payload.
///
/// In TOML this is an internally tagged table:
///
/// ```toml
/// [qr.address]
/// strategy = "prefixed"
/// marker = "lava="
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "kebab-case")]
pub enum AddressStrategy {
    /// The payload must start with `marker`; the remainder is the address.
    Prefixed {
        #[serde(default = "default_marker")]
        marker: String,
    },
    /// The first valid dotted-quad IPv4 address anywhere in the payload.
    BareIpv4,
}

fn default_marker() -> String {
    DEFAULT_ADDRESS_MARKER.to_string()
}

impl Default for AddressStrategy {
    fn default() -> Self {
        AddressStrategy::Prefixed {
            marker: default_marker(),
        }
    }
}

impl AddressStrategy {
    /// Extracts a [`ServerAddress`] from `text` using this strategy.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError`] when the payload does not carry an address in
    /// the expected format.
    pub fn extract(&self, text: &str) -> Result<ServerAddress, PayloadError> {
        match self {
            AddressStrategy::Prefixed { marker } => parse_server_address(text, marker),
            AddressStrategy::BareIpv4 => extract_ipv4_occurrences(text)
                .into_iter()
                .next()
                .ok_or(PayloadError::NoIpv4Address)
                .and_then(ServerAddress::new),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_token() {
        assert_eq!(ServerAddress::new("").unwrap_err(), PayloadError::EmptyAddress);
    }

    #[test]
    fn test_url_prepends_http_for_bare_address() {
        let addr = ServerAddress::new("10.0.0.5:3000").unwrap();
        assert_eq!(addr.url(), "http://10.0.0.5:3000");
    }

    #[test]
    fn test_url_keeps_existing_scheme() {
        let addr = ServerAddress::new("https://lava.local/display").unwrap();
        assert_eq!(addr.url(), "https://lava.local/display");
    }

    #[test]
    fn test_display_prints_raw_token() {
        let addr = ServerAddress::new("10.0.0.5").unwrap();
        assert_eq!(addr.to_string(), "10.0.0.5");
    }

    #[test]
    fn test_default_strategy_uses_lava_marker() {
        assert_eq!(
            AddressStrategy::default(),
            AddressStrategy::Prefixed {
                marker: "lava=".to_string()
            }
        );
    }

    #[test]
    fn test_prefixed_strategy_extracts_remainder() {
        let addr = AddressStrategy::default().extract("lava=10.0.0.5").unwrap();
        assert_eq!(addr.as_str(), "10.0.0.5");
    }

    #[test]
    fn test_bare_ipv4_strategy_takes_first_occurrence() {
        // Arrange
        let text = "server 192.168.4.10 backup 192.168.4.11";

        // Act
        let addr = AddressStrategy::BareIpv4.extract(text).unwrap();

        // Assert
        assert_eq!(addr.as_str(), "192.168.4.10");
    }

    #[test]
    fn test_strategy_deserializes_from_tagged_toml() {
        // Arrange
        let prefixed = "strategy = \"prefixed\"\nmarker = \"srv:\"\n";
        let bare = "strategy = \"bare-ipv4\"\n";

        // Act
        let prefixed: AddressStrategy = toml::from_str(prefixed).expect("prefixed");
        let bare: AddressStrategy = toml::from_str(bare).expect("bare");

        // Assert
        assert_eq!(
            prefixed,
            AddressStrategy::Prefixed {
                marker: "srv:".to_string()
            }
        );
        assert_eq!(bare, AddressStrategy::BareIpv4);
    }

    #[test]
    fn test_prefixed_strategy_without_marker_uses_default() {
        let strategy: AddressStrategy = toml::from_str("strategy = \"prefixed\"\n").unwrap();
        assert_eq!(strategy, AddressStrategy::default());
    }

    #[test]
    fn test_bare_ipv4_strategy_ignores_prefix_marker() {
        // The two strategies are exclusive: a prefixed payload without an IP
        // is not an address for the bare strategy.
        assert_eq!(
            AddressStrategy::BareIpv4.extract("lava=display.local").unwrap_err(),
            PayloadError::NoIpv4Address
        );
    }
}
