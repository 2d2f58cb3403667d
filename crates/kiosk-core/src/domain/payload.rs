//! Pure parsers for raw QR payload text.
//!
//! Every function here is a pure function of its input: no I/O, no hidden
//! state, and calling it twice on the same text yields the same result.
//!
//! # Wi-Fi payload format (for beginners)
//!
//! Phones and label printers encode Wi-Fi networks as a single line of
//! `;`-separated fields:
//!
//! ```text
//! WIFI:S:<ssid>;T:WPA;P:<password>;;
//! ```
//!
//! Field order is not guaranteed, so the parser looks at each segment's
//! marker instead of its position.  Only two markers matter here:
//! [`SSID_MARKER`] (which includes the leading `WIFI:`) and
//! [`PASSWORD_MARKER`].  Everything else (`T:`, `H:`, empty trailing
//! segments) is ignored.

use std::net::Ipv4Addr;

use thiserror::Error;

use crate::domain::address::ServerAddress;
use crate::domain::credential::WifiCredential;

/// Segment prefix carrying the SSID.
pub const SSID_MARKER: &str = "WIFI:S:";

/// Segment prefix carrying the password.
pub const PASSWORD_MARKER: &str = "P:";

/// Reasons a QR payload is not the expected kind of code.
///
/// None of these are failures of the device: they simply mean "this is not
/// the code we are waiting for", and the orchestrator asks for another scan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// No non-empty `WIFI:S:` segment.
    #[error("payload has no SSID segment")]
    MissingSsid,
    /// No non-empty `P:` segment.
    #[error("payload has no password segment")]
    MissingPassword,
    /// The payload does not start with the expected address marker.
    #[error("payload does not start with {marker:?}")]
    MissingMarker { marker: String },
    /// The marker is present but nothing follows it.
    #[error("address after marker is empty")]
    EmptyAddress,
    /// No valid dotted-quad IPv4 address was found.
    #[error("payload contains no IPv4 address")]
    NoIpv4Address,
}

/// Parses a Wi-Fi QR payload into a [`WifiCredential`].
///
/// The text is split on `;`.  A segment starting with [`SSID_MARKER`] yields
/// the SSID (exactly the marker's length is stripped); a segment starting with
/// [`PASSWORD_MARKER`] yields the password.  When a marker appears more than
/// once, the last occurrence wins.
///
/// # Errors
///
/// Returns [`PayloadError::MissingSsid`] or [`PayloadError::MissingPassword`]
/// if either field is absent or empty.
pub fn parse_wifi_credential(text: &str) -> Result<WifiCredential, PayloadError> {
    let mut ssid: Option<&str> = None;
    let mut password: Option<&str> = None;

    for segment in text.split(';') {
        if let Some(rest) = segment.strip_prefix(SSID_MARKER) {
            ssid = Some(rest);
        } else if let Some(rest) = segment.strip_prefix(PASSWORD_MARKER) {
            password = Some(rest);
        }
    }

    let ssid = ssid.filter(|s| !s.is_empty()).ok_or(PayloadError::MissingSsid)?;
    let password = password
        .filter(|p| !p.is_empty())
        .ok_or(PayloadError::MissingPassword)?;

    WifiCredential::new(ssid, password)
}

/// Parses a server-address payload of the form `<marker><address>`.
///
/// The marker must match exactly at position zero.  An empty remainder
/// (`"lava="`) is rejected.
///
/// # Errors
///
/// Returns [`PayloadError::MissingMarker`] if the text does not start with
/// `marker`, or [`PayloadError::EmptyAddress`] if nothing follows it.
pub fn parse_server_address(text: &str, marker: &str) -> Result<ServerAddress, PayloadError> {
    let rest = text
        .strip_prefix(marker)
        .ok_or_else(|| PayloadError::MissingMarker {
            marker: marker.to_string(),
        })?;
    ServerAddress::new(rest)
}

/// Finds every dotted-quad IPv4 address in `text`, in order of appearance.
///
/// Candidates are runs of four 1–3 digit groups separated by dots.  Each
/// candidate is then confirmed with [`Ipv4Addr`]'s parser, which rejects
/// octets above 255 and leading zeros.
pub fn extract_ipv4_occurrences(text: &str) -> Vec<String> {
    let mut found = Vec::new();

    for run in text.split(|c: char| !(c.is_ascii_digit() || c == '.')) {
        let groups: Vec<&str> = run.split('.').collect();
        let mut i = 0;
        while i + 4 <= groups.len() {
            let window = &groups[i..i + 4];
            if window.iter().all(|g| is_octet_candidate(g)) {
                let candidate = window.join(".");
                if candidate.parse::<Ipv4Addr>().is_ok() {
                    found.push(candidate);
                    i += 4;
                    continue;
                }
            }
            i += 1;
        }
    }

    found
}

fn is_octet_candidate(group: &str) -> bool {
    (1..=3).contains(&group.len()) && group.bytes().all(|b| b.is_ascii_digit())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── parse_wifi_credential ─────────────────────────────────────────────────

    #[test]
    fn test_parse_wifi_credential_standard_order() {
        let cred = parse_wifi_credential("WIFI:S:office;P:hunter22;;").unwrap();
        assert_eq!(cred.ssid(), "office");
        assert_eq!(cred.password(), "hunter22");
    }

    #[test]
    fn test_parse_wifi_credential_password_first() {
        let cred = parse_wifi_credential("P:hunter22;WIFI:S:office;;").unwrap();
        assert_eq!(cred.ssid(), "office");
        assert_eq!(cred.password(), "hunter22");
    }

    #[test]
    fn test_parse_wifi_credential_ignores_unrelated_segments() {
        // Arrange
        let text = "T:WPA;WIFI:S:office;H:false;P:hunter22;X:unused;;";

        // Act
        let cred = parse_wifi_credential(text).unwrap();

        // Assert
        assert_eq!(cred.ssid(), "office");
        assert_eq!(cred.password(), "hunter22");
    }

    #[test]
    fn test_parse_wifi_credential_strips_exact_marker_length() {
        // Colons inside the value survive; only the marker itself is removed.
        let cred = parse_wifi_credential("WIFI:S:cafe:guest;P:pa:ss;;").unwrap();
        assert_eq!(cred.ssid(), "cafe:guest");
        assert_eq!(cred.password(), "pa:ss");
    }

    #[test]
    fn test_parse_wifi_credential_missing_password_is_invalid() {
        assert_eq!(
            parse_wifi_credential("WIFI:S:office;T:WPA;;").unwrap_err(),
            PayloadError::MissingPassword
        );
    }

    #[test]
    fn test_parse_wifi_credential_missing_ssid_is_invalid() {
        assert_eq!(
            parse_wifi_credential("T:WPA;P:hunter22;;").unwrap_err(),
            PayloadError::MissingSsid
        );
    }

    #[test]
    fn test_parse_wifi_credential_empty_values_are_invalid() {
        assert_eq!(
            parse_wifi_credential("WIFI:S:;P:hunter22;;").unwrap_err(),
            PayloadError::MissingSsid
        );
        assert_eq!(
            parse_wifi_credential("WIFI:S:office;P:;;").unwrap_err(),
            PayloadError::MissingPassword
        );
    }

    #[test]
    fn test_parse_wifi_credential_bare_s_marker_is_not_an_ssid() {
        // Only the literal `WIFI:S:` marker carries the SSID.
        assert_eq!(
            parse_wifi_credential("WIFI:T:WPA;S:office;P:hunter22;;").unwrap_err(),
            PayloadError::MissingSsid
        );
    }

    #[test]
    fn test_parse_wifi_credential_last_occurrence_wins() {
        let cred = parse_wifi_credential("WIFI:S:old;P:one;WIFI:S:new;P:two;;").unwrap();
        assert_eq!(cred.ssid(), "new");
        assert_eq!(cred.password(), "two");
    }

    #[test]
    fn test_parse_wifi_credential_on_unrelated_text_is_invalid() {
        assert!(parse_wifi_credential("lava=10.0.0.5").is_err());
        assert!(parse_wifi_credential("").is_err());
    }

    // ── parse_server_address ──────────────────────────────────────────────────

    #[test]
    fn test_parse_server_address_valid() {
        let addr = parse_server_address("lava=10.0.0.5", "lava=").unwrap();
        assert_eq!(addr.as_str(), "10.0.0.5");
    }

    #[test]
    fn test_parse_server_address_wrong_prefix_is_invalid() {
        assert_eq!(
            parse_server_address("foo=10.0.0.5", "lava=").unwrap_err(),
            PayloadError::MissingMarker {
                marker: "lava=".to_string()
            }
        );
    }

    #[test]
    fn test_parse_server_address_marker_not_at_start_is_invalid() {
        assert!(parse_server_address(" lava=10.0.0.5", "lava=").is_err());
        assert!(parse_server_address("x lava=10.0.0.5", "lava=").is_err());
    }

    #[test]
    fn test_parse_server_address_empty_remainder_is_invalid() {
        assert_eq!(
            parse_server_address("lava=", "lava=").unwrap_err(),
            PayloadError::EmptyAddress
        );
    }

    #[test]
    fn test_parse_server_address_keeps_full_url() {
        let addr = parse_server_address("lava=https://display.local:8443/map", "lava=").unwrap();
        assert_eq!(addr.as_str(), "https://display.local:8443/map");
    }

    // ── extract_ipv4_occurrences ──────────────────────────────────────────────

    #[test]
    fn test_extract_ipv4_finds_all_in_order() {
        assert_eq!(
            extract_ipv4_occurrences("a 10.0.0.1, b 192.168.1.20:8080"),
            vec!["10.0.0.1".to_string(), "192.168.1.20".to_string()]
        );
    }

    #[test]
    fn test_extract_ipv4_rejects_out_of_range_octets() {
        assert!(extract_ipv4_occurrences("999.1.1.1").is_empty());
        assert!(extract_ipv4_occurrences("10.0.0.256").is_empty());
    }

    #[test]
    fn test_extract_ipv4_rejects_leading_zeros() {
        assert!(extract_ipv4_occurrences("010.0.0.1").is_empty());
    }

    #[test]
    fn test_extract_ipv4_rejects_short_quads() {
        assert!(extract_ipv4_occurrences("version 1.2.3").is_empty());
    }

    #[test]
    fn test_extract_ipv4_boundary_octets() {
        assert_eq!(
            extract_ipv4_occurrences("0.0.0.0 255.255.255.255"),
            vec!["0.0.0.0".to_string(), "255.255.255.255".to_string()]
        );
    }

    #[test]
    fn test_extract_ipv4_on_text_without_digits_is_empty() {
        assert!(extract_ipv4_occurrences("WIFI:S:office;P:x;;").is_empty());
    }

    // ── Purity ────────────────────────────────────────────────────────────────

    #[test]
    fn test_parsers_are_idempotent() {
        let wifi = "P:pw;T:WPA;WIFI:S:net;;";
        assert_eq!(parse_wifi_credential(wifi), parse_wifi_credential(wifi));

        let server = "lava=10.0.0.5";
        assert_eq!(
            parse_server_address(server, "lava="),
            parse_server_address(server, "lava=")
        );

        let text = "1.2.3.4 and 5.6.7.8";
        assert_eq!(extract_ipv4_occurrences(text), extract_ipv4_occurrences(text));
    }
}
