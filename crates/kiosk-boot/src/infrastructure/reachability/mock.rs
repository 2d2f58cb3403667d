//! Scripted reachability probe for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use kiosk_core::ServerAddress;

use crate::application::ports::{ReachabilityError, ReachabilityProbe};

/// A probe that answers from a queue of booleans.
///
/// Once the queue is empty every further probe reports reachable.
#[derive(Default)]
pub struct ScriptedReachabilityProbe {
    answers: Mutex<VecDeque<bool>>,
    /// Addresses probed, in call order.
    pub probes: Mutex<Vec<ServerAddress>>,
}

impl ScriptedReachabilityProbe {
    /// Creates a probe that answers `answers` in order, then `true`.
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            probes: Mutex::new(Vec::new()),
        }
    }

    /// Number of probes so far.
    pub fn probe_count(&self) -> usize {
        self.probes.lock().unwrap().len()
    }
}

#[async_trait]
impl ReachabilityProbe for ScriptedReachabilityProbe {
    async fn probe(&self, address: &ServerAddress) -> Result<(), ReachabilityError> {
        self.probes.lock().unwrap().push(address.clone());
        let reachable = self.answers.lock().unwrap().pop_front().unwrap_or(true);
        if reachable {
            Ok(())
        } else {
            Err(ReachabilityError::Unreachable {
                url: address.url(),
                reason: "simulated connection refused".to_string(),
            })
        }
    }
}
