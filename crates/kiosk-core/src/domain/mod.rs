//! Domain entities for the kiosk bootstrap.
//!
//! This module contains pure business logic with no infrastructure
//! dependencies.  Every entity is ephemeral: it is created during a single
//! bootstrap run, handed to the next step, and dropped.  Nothing is persisted
//! across restarts.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! The innermost layer of a layered application holds the data types and
//! rules that make the system what it is.  Here that means "a Wi-Fi
//! credential is only valid with both an SSID and a password" and "a server
//! address code must start with the marker".  Outer layers (the orchestrator,
//! the OS adapters) depend on these types; the domain never depends on them.

/// Server address token and the strategy used to extract it from QR text.
pub mod address;

/// Validated Wi-Fi credentials.
pub mod credential;

/// A network seen in a Wi-Fi scan.
pub mod network;

/// Pure parsers for raw QR payload text.
pub mod payload;

/// Result of a single QR reader invocation.
pub mod scan;
