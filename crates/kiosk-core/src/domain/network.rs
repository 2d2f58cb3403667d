//! A Wi-Fi network seen in a scan.

/// One entry of a Wi-Fi scan result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleNetwork {
    /// Network name.  Hidden networks report an empty SSID.
    pub ssid: String,
    /// Security mode as reported by the controller (`"WPA2"`, `"WPA1 WPA2"`,
    /// or empty for open networks).
    pub security: String,
    /// Signal strength, 0 to 100.
    pub signal: u8,
}

/// Returns `true` if a network named `ssid` is present in `networks`.
///
/// SSIDs are compared byte-for-byte; Wi-Fi names are case sensitive.
pub fn is_visible(networks: &[VisibleNetwork], ssid: &str) -> bool {
    networks.iter().any(|n| n.ssid == ssid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net(ssid: &str) -> VisibleNetwork {
        VisibleNetwork {
            ssid: ssid.to_string(),
            security: "WPA2".to_string(),
            signal: 70,
        }
    }

    #[test]
    fn test_is_visible_finds_exact_ssid() {
        let nets = vec![net("lobby"), net("office")];
        assert!(is_visible(&nets, "office"));
    }

    #[test]
    fn test_is_visible_is_case_sensitive() {
        let nets = vec![net("Office")];
        assert!(!is_visible(&nets, "office"));
    }

    #[test]
    fn test_is_visible_on_empty_scan_is_false() {
        assert!(!is_visible(&[], "office"));
    }
}
