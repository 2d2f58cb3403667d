//! HTTP reachability probe.
//!
//! One `GET` per probe against [`ServerAddress::url`].  The server counts as
//! reachable as soon as any HTTP response arrives, whatever its status: a
//! display server answering `404` or `503` is up, it just is not ready to
//! serve that path.  Connection refusal, DNS failure, TLS failure, and
//! timeouts count as unreachable.

use std::time::Duration;

use async_trait::async_trait;
use kiosk_core::ServerAddress;
use reqwest::Client;
use tracing::debug;

use crate::application::ports::{ReachabilityError, ReachabilityProbe};

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Reachability probe backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpReachabilityProbe {
    client: Client,
}

impl HttpReachabilityProbe {
    /// Builds a probe whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns the `reqwest` error if the HTTP client cannot be initialised.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ReachabilityProbe for HttpReachabilityProbe {
    async fn probe(&self, address: &ServerAddress) -> Result<(), ReachabilityError> {
        let url = address.url();
        match self.client.get(&url).send().await {
            Ok(response) => {
                debug!(%url, status = %response.status(), "server responded");
                Ok(())
            }
            Err(e) => Err(ReachabilityError::Unreachable {
                url,
                reason: e.to_string(),
            }),
        }
    }
}
