//! Application layer for the kiosk bootstrap.
//!
//! # What lives here?
//!
//! - **`ports`** – The traits the orchestrator talks to: QR reader, network
//!   status probe, Wi-Fi controller, reachability probe, launcher.  The
//!   infrastructure layer implements them; tests implement them with
//!   recording doubles.
//!
//! - **`cancel`** – A clonable cancellation token.  Ctrl-C / SIGTERM in
//!   `main` flips it, and every wait inside the orchestrator races against it.
//!
//! - **`connectivity`** – "Does this device already have a network?"
//!   derived from the network status probe.
//!
//! - **`bootstrap`** – The state machine that sequences everything and
//!   decides what to do on each result.

pub mod bootstrap;
pub mod cancel;
pub mod connectivity;
pub mod ports;
