//! kiosk-boot library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does kiosk-boot do? (for beginners)
//!
//! A kiosk is switched on somewhere without a keyboard.  kiosk-boot turns it
//! into a display for a server on the local network:
//!
//! 1. Waits a fixed delay so the OS network stack is up.
//! 2. Checks whether any configured interface (`eth0`, `en0`, `wlan0`) has an
//!    IPv4 address.
//! 3. If not, asks the operator to hold a Wi-Fi QR code in front of the
//!    camera, parses the credentials, and joins that network.
//! 4. Asks for a second QR code carrying the server address (`lava=...`).
//! 5. Polls the server until it answers.
//! 6. Launches the browser on the server's URL.
//!
//! Every "ask" step repeats until it succeeds: the camera is the only input
//! the device has, so a bad code just means "show me another one".

/// Application layer: the bootstrap state machine and its ports.
pub mod application;

/// Infrastructure layer: OS adapters and configuration storage.
pub mod infrastructure;
