//! Reachability probe adapters.

pub mod http;
pub mod mock;

pub use http::HttpReachabilityProbe;
