//! QR reader backed by `zbarcam` from the zbar tools.
//!
//! # How a scan works
//!
//! Each call to [`ZbarQrReader::scan`] spawns
//!
//! ```text
//! zbarcam --raw --oneshot -Sdisable -Sqrcode.enable <video_device>
//! ```
//!
//! which opens the camera, shows a live preview window, and exits as soon as
//! one QR code is decoded.  `--raw` prints only the decoded text (no
//! `QR-Code:` type prefix) and the `-S` switches restrict decoding to QR codes
//! so a barcode on a box in the background is never mistaken for a payload.
//!
//! The child is spawned with `kill_on_drop(true)`: if the orchestrator drops
//! the scan future (cancellation), tokio kills the process, so the camera is
//! released before control returns.
//!
//! # Exit status mapping
//!
//! | zbarcam result                         | [`ScanAttempt`] / error          |
//! |----------------------------------------|----------------------------------|
//! | exit 0, text on stdout                 | `Decoded(text)`                  |
//! | exit 0, nothing on stdout              | `Quit` (preview window closed)   |
//! | killed by a signal                     | `NothingDecoded`                 |
//! | non-zero exit                          | `QrReaderError::CameraUnavailable` |
//!
//! zbarcam has no prompt overlay, so the prompt is written to the log where
//! the kiosk's console shows it.

use std::process::Stdio;

use async_trait::async_trait;
use kiosk_core::ScanAttempt;
use tokio::process::Command;
use tracing::{debug, info};

use crate::application::ports::{QrReader, QrReaderError};

/// Default scanner binary.
pub const DEFAULT_SCANNER_COMMAND: &str = "zbarcam";

/// Default camera device.
pub const DEFAULT_VIDEO_DEVICE: &str = "/dev/video0";

/// QR reader that runs `zbarcam` once per scan.
#[derive(Debug, Clone)]
pub struct ZbarQrReader {
    command: String,
    video_device: String,
}

impl ZbarQrReader {
    /// Creates a reader running `command` against `video_device`.
    pub fn new(command: impl Into<String>, video_device: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            video_device: video_device.into(),
        }
    }

    /// Arguments passed to the scanner binary.
    pub fn args(&self) -> Vec<String> {
        vec![
            "--raw".to_string(),
            "--oneshot".to_string(),
            "-Sdisable".to_string(),
            "-Sqrcode.enable".to_string(),
            self.video_device.clone(),
        ]
    }
}

impl Default for ZbarQrReader {
    fn default() -> Self {
        Self::new(DEFAULT_SCANNER_COMMAND, DEFAULT_VIDEO_DEVICE)
    }
}

#[async_trait]
impl QrReader for ZbarQrReader {
    async fn scan(&self, prompt: &str) -> Result<ScanAttempt, QrReaderError> {
        info!(device = %self.video_device, "{prompt}");

        let output = Command::new(&self.command)
            .args(self.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| QrReaderError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!(status = ?output.status, "scanner exited");

        interpret_scanner_exit(output.status.code(), &stdout, &stderr)
    }
}

/// Maps a finished scanner process to a scan result.
///
/// `code` is `None` when the process was terminated by a signal.
pub fn interpret_scanner_exit(
    code: Option<i32>,
    stdout: &str,
    stderr: &str,
) -> Result<ScanAttempt, QrReaderError> {
    match code {
        None => Ok(ScanAttempt::NothingDecoded),
        Some(0) if stdout.trim().is_empty() => Ok(ScanAttempt::Quit),
        Some(0) => Ok(ScanAttempt::from_output(stdout)),
        Some(code) => {
            let reason = stderr
                .lines()
                .map(str::trim)
                .find(|l| !l.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("scanner exited with status {code}"));
            Err(QrReaderError::CameraUnavailable(reason))
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
