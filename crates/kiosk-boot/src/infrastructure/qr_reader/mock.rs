//! Scripted QR reader for tests.
//!
//! # Why a scripted reader?
//!
//! The real reader needs a camera, a display, and an operator holding up a
//! code.  `ScriptedQrReader` replaces all of that with a queue of canned
//! results: each call to `scan` pops the next one and records the prompt it
//! was given, so tests can assert both what the orchestrator saw and what it
//! asked for.
//!
//! When the script runs out the reader keeps returning
//! [`ScanAttempt::NothingDecoded`] and cancels the optional token, which lets
//! "loops forever on bad input" tests terminate deterministically.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use kiosk_core::ScanAttempt;

use crate::application::cancel::CancelToken;
use crate::application::ports::{QrReader, QrReaderError};

/// One scripted result: either an attempt or a reader failure message.
pub type ScriptedScan = Result<ScanAttempt, String>;

/// A QR reader that replays a fixed script of results.
#[derive(Default)]
pub struct ScriptedQrReader {
    script: Mutex<VecDeque<ScriptedScan>>,
    /// Prompts passed to `scan`, in call order.
    pub prompts: Mutex<Vec<String>>,
    cancel_when_exhausted: Option<CancelToken>,
}

impl ScriptedQrReader {
    /// Creates a reader that replays `script` in order.
    pub fn new(script: impl IntoIterator<Item = ScriptedScan>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Creates a reader that decodes each of `texts` in order.
    pub fn decoding<'a>(texts: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(
            texts
                .into_iter()
                .map(|t| Ok(ScanAttempt::Decoded(t.to_string()))),
        )
    }

    /// Cancels `token` the first time the script is exhausted.
    pub fn cancel_when_exhausted(mut self, token: CancelToken) -> Self {
        self.cancel_when_exhausted = Some(token);
        self
    }

    /// Number of `scan` calls so far.
    pub fn scan_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl QrReader for ScriptedQrReader {
    async fn scan(&self, prompt: &str) -> Result<ScanAttempt, QrReaderError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Ok(attempt)) => Ok(attempt),
            Some(Err(message)) => Err(QrReaderError::CameraUnavailable(message)),
            None => {
                if let Some(token) = &self.cancel_when_exhausted {
                    token.cancel();
                }
                Ok(ScanAttempt::NothingDecoded)
            }
        }
    }
}
