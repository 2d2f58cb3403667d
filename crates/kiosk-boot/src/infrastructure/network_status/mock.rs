//! In-memory network status probe for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::{NetworkProbeError, NetworkStatusProbe};

/// A probe that answers from a fixed interface → addresses table.
///
/// Interfaces absent from the table report [`NetworkProbeError::NoSuchInterface`];
/// interfaces listed in `failing` report [`NetworkProbeError::QueryFailed`].
#[derive(Default)]
pub struct StaticNetworkStatus {
    interfaces: HashMap<String, Vec<String>>,
    failing: Vec<String>,
    /// Interface names queried, in call order.
    pub queries: Mutex<Vec<String>>,
}

impl StaticNetworkStatus {
    /// A device with no interfaces at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an interface holding `addresses`.
    pub fn with_interface(mut self, name: &str, addresses: &[&str]) -> Self {
        self.interfaces.insert(
            name.to_string(),
            addresses.iter().map(|a| a.to_string()).collect(),
        );
        self
    }

    /// Makes queries for `name` fail.
    pub fn with_failing_interface(mut self, name: &str) -> Self {
        self.failing.push(name.to_string());
        self
    }
}

#[async_trait]
impl NetworkStatusProbe for StaticNetworkStatus {
    async fn interface_addresses(&self, interface: &str) -> Result<Vec<String>, NetworkProbeError> {
        self.queries.lock().unwrap().push(interface.to_string());
        if self.failing.iter().any(|f| f == interface) {
            return Err(NetworkProbeError::QueryFailed(format!(
                "simulated failure on {interface}"
            )));
        }
        self.interfaces
            .get(interface)
            .cloned()
            .ok_or_else(|| NetworkProbeError::NoSuchInterface(interface.to_string()))
    }
}
