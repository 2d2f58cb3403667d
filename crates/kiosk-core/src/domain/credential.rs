//! Validated Wi-Fi credentials.

use std::fmt;

use crate::domain::payload::PayloadError;

/// An SSID / password pair that is known to be complete.
///
/// Both fields are guaranteed non-empty: the only constructors are
/// [`WifiCredential::new`] and [`crate::parse_wifi_credential`], and both
/// reject empty values.  This is what allows the Wi-Fi controller to accept a
/// `&WifiCredential` without re-validating it.
#[derive(Clone, PartialEq, Eq)]
pub struct WifiCredential {
    ssid: String,
    password: String,
}

impl WifiCredential {
    /// Builds a credential from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::MissingSsid`] or [`PayloadError::MissingPassword`]
    /// when the corresponding field is empty.
    pub fn new(ssid: impl Into<String>, password: impl Into<String>) -> Result<Self, PayloadError> {
        let ssid = ssid.into();
        let password = password.into();
        if ssid.is_empty() {
            return Err(PayloadError::MissingSsid);
        }
        if password.is_empty() {
            return Err(PayloadError::MissingPassword);
        }
        Ok(Self { ssid, password })
    }

    /// The network name.
    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    /// The network passphrase.
    pub fn password(&self) -> &str {
        &self.password
    }
}

// The password must never end up in a log line.
impl fmt::Debug for WifiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WifiCredential")
            .field("ssid", &self.ssid)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
