//! Wi-Fi controller backed by NetworkManager's `nmcli`.
//!
//! # Commands used
//!
//! | Operation                | Command                                                  |
//! |--------------------------|----------------------------------------------------------|
//! | `list_visible_networks`  | `nmcli -t -f SSID,SECURITY,SIGNAL device wifi list`      |
//! | `current_network`        | `nmcli -t -f ACTIVE,SSID device wifi list`               |
//! | `associate`              | `nmcli --ask device wifi connect <ssid>` (password on stdin) |
//!
//! When a Wi-Fi interface is configured, `ifname <iface>` is appended to each.
//!
//! # Terse output (for beginners)
//!
//! `-t` makes nmcli print one record per line with fields separated by `:`.
//! A `:` inside a value (an SSID like `Cafe:Guest`) is escaped as `\:` and a
//! backslash as `\\`, so a plain `split(':')` is not enough;
//! [`split_terse_fields`] undoes the escaping.
//!
//! The password is written to nmcli's stdin in answer to its `--ask` prompt.
//! It never appears in the argument list (readable by any local user through
//! `/proc/<pid>/cmdline`), in log lines, or in error messages produced here.

use std::process::Stdio;

use async_trait::async_trait;
use kiosk_core::{VisibleNetwork, WifiCredential};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::application::ports::{WifiController, WifiError};

const NMCLI_COMMAND: &str = "nmcli";

/// Wi-Fi controller that drives `nmcli`.
#[derive(Debug, Clone, Default)]
pub struct NmcliWifiController {
    interface: Option<String>,
}

impl NmcliWifiController {
    /// Creates a controller.  `interface` pins every command to one radio;
    /// `None` lets NetworkManager pick.
    pub fn new(interface: Option<String>) -> Self {
        Self { interface }
    }

    /// Runs nmcli and returns its stdout.  `label` names the command in errors.
    ///
    /// `input` is written to the child's stdin followed by a newline.
    async fn run(
        &self,
        mut args: Vec<String>,
        label: &str,
        input: Option<&str>,
    ) -> Result<String, WifiError> {
        if let Some(interface) = &self.interface {
            args.push("ifname".to_string());
            args.push(interface.clone());
        }
        let command_failed = |source| WifiError::CommandFailed {
            command: label.to_string(),
            source,
        };

        let mut child = Command::new(NMCLI_COMMAND)
            .args(&args)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(command_failed)?;

        if let (Some(input), Some(mut stdin)) = (input, child.stdin.take()) {
            // nmcli does not read stdin for open networks and may already
            // have exited; its exit status is what counts.
            let written = async {
                stdin.write_all(input.as_bytes()).await?;
                stdin.write_all(b"\n").await?;
                stdin.shutdown().await
            }
            .await;
            if let Err(e) = written {
                debug!(command = label, "nmcli stdin closed early: {e}");
            }
        }

        let output = child.wait_with_output().await.map_err(command_failed)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(WifiError::Rejected(format!(
                "`{label}` exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}

/// Arguments for joining `ssid`.  `--ask` makes nmcli read the password from
/// stdin.
pub fn connect_args(ssid: &str) -> Vec<String> {
    strings(&["--ask", "device", "wifi", "connect", ssid])
}

#[async_trait]
impl WifiController for NmcliWifiController {
    async fn list_visible_networks(&self) -> Result<Vec<VisibleNetwork>, WifiError> {
        let stdout = self
            .run(
                strings(&["-t", "-f", "SSID,SECURITY,SIGNAL", "device", "wifi", "list"]),
                "nmcli device wifi list",
                None,
            )
            .await?;
        let networks = parse_network_list(&stdout);
        debug!(count = networks.len(), "visible Wi-Fi networks");
        Ok(networks)
    }

    async fn current_network(&self) -> Result<Option<String>, WifiError> {
        let stdout = self
            .run(
                strings(&["-t", "-f", "ACTIVE,SSID", "device", "wifi", "list"]),
                "nmcli device wifi list",
                None,
            )
            .await?;
        Ok(parse_active_ssid(&stdout))
    }

    async fn associate(&self, credential: &WifiCredential) -> Result<(), WifiError> {
        self.run(
            connect_args(credential.ssid()),
            "nmcli device wifi connect",
            Some(credential.password()),
        )
        .await?;
        Ok(())
    }
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Splits one line of nmcli terse output into its unescaped fields.
pub fn split_terse_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            ':' => fields.push(std::mem::take(&mut current)),
            other => current.push(other),
        }
    }
    fields.push(current);
    fields
}

/// Parses `-t -f SSID,SECURITY,SIGNAL` output.  Hidden networks (empty SSID)
/// are skipped; an unparsable signal is reported as 0.
pub fn parse_network_list(output: &str) -> Vec<VisibleNetwork> {
    output
        .lines()
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let mut fields = split_terse_fields(line).into_iter();
            let ssid = fields.next()?;
            if ssid.is_empty() {
                return None;
            }
            let security = fields.next().unwrap_or_default();
            let signal = fields
                .next()
                .and_then(|s| s.trim().parse::<u8>().ok())
                .unwrap_or(0);
            Some(VisibleNetwork {
                ssid,
                security,
                signal,
            })
        })
        .collect()
}

/// Parses `-t -f ACTIVE,SSID` output and returns the SSID marked active.
pub fn parse_active_ssid(output: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let fields = split_terse_fields(line);
        match fields.as_slice() {
            [active, ssid] if active == "yes" && !ssid.is_empty() => Some(ssid.clone()),
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_handles_escaped_colon_and_backslash() {
        assert_eq!(
            split_terse_fields(r"Cafe\:Guest:WPA2:70"),
            vec!["Cafe:Guest", "WPA2", "70"]
        );
        assert_eq!(split_terse_fields(r"a\\b:x"), vec![r"a\b", "x"]);
    }

    #[test]
    fn test_connect_args_keep_password_off_the_command_line() {
        // Arrange
        let credential = WifiCredential::new("Cafe Guest", "hunter22").unwrap();

        // Act
        let args = connect_args(credential.ssid());

        // Assert
        assert_eq!(args, vec!["--ask", "device", "wifi", "connect", "Cafe Guest"]);
        assert!(args.iter().all(|a| !a.contains("hunter22")));
        assert!(!args.iter().any(|a| a == "password"));
    }

    #[test]
    fn test_split_keeps_empty_fields() {
        assert_eq!(split_terse_fields(":--:42"), vec!["", "--", "42"]);
    }

    #[test]
    fn test_parse_network_list() {
        // Arrange
        let output = "kiosk-net:WPA2:80\n:WPA2:30\nlobby::55\nCafe\\:Guest:WPA1 WPA2:12\n";

        // Act
        let networks = parse_network_list(output);

        // Assert
        assert_eq!(networks.len(), 3, "hidden network skipped");
        assert_eq!(networks[0].ssid, "kiosk-net");
        assert_eq!(networks[0].signal, 80);
        assert_eq!(networks[1].ssid, "lobby");
        assert_eq!(networks[1].security, "");
        assert_eq!(networks[2].ssid, "Cafe:Guest");
        assert_eq!(networks[2].security, "WPA1 WPA2");
    }

    #[test]
    fn test_parse_network_list_bad_signal_is_zero() {
        let networks = parse_network_list("kiosk-net:WPA2:strong\n");
        assert_eq!(networks[0].signal, 0);
    }

    #[test]
    fn test_parse_active_ssid_finds_active_network() {
        let output = "no:lobby\nyes:kiosk-net\nno:Cafe\\:Guest\n";
        assert_eq!(parse_active_ssid(output), Some("kiosk-net".to_string()));
    }

    #[test]
    fn test_parse_active_ssid_none_when_not_associated() {
        assert_eq!(parse_active_ssid("no:lobby\nno:kiosk-net\n"), None);
        assert_eq!(parse_active_ssid(""), None);
    }

    #[test]
    fn test_parse_active_ssid_unescapes_colon() {
        assert_eq!(
            parse_active_ssid("yes:Cafe\\:Guest\n"),
            Some("Cafe:Guest".to_string())
        );
    }
}
