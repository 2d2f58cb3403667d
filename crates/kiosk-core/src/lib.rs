//! # kiosk-core
//!
//! Shared domain library for the kiosk bootstrap daemon.  It defines the data
//! that flows through a bootstrap run (Wi-Fi credentials, server addresses,
//! QR scan attempts, visible networks) and the pure parsers that turn raw QR
//! payload text into those types.
//!
//! The crate has zero dependencies on OS APIs, cameras, network sockets, or
//! child processes.  Everything here can be unit-tested on any machine.
//!
//! # Architecture overview (for beginners)
//!
//! A kiosk is a device without a keyboard.  When it powers on it must find a
//! network and a server to display, and the only input channel it has is a
//! camera pointed at QR codes held up by an operator.  Two kinds of QR code
//! are understood:
//!
//! - A **Wi-Fi code** (`WIFI:S:<ssid>;P:<password>;...`) carrying network
//!   credentials, parsed by [`parse_wifi_credential`].
//! - A **server code** (`lava=<address>`) carrying the address the browser
//!   should open, parsed by [`parse_server_address`].
//!
//! The orchestration that sequences these steps lives in the `kiosk-boot`
//! crate; this crate only answers "what does this QR text mean?".

pub mod domain;

pub use domain::address::{AddressStrategy, ServerAddress, DEFAULT_ADDRESS_MARKER};
pub use domain::credential::WifiCredential;
pub use domain::network::{is_visible, VisibleNetwork};
pub use domain::payload::{
    extract_ipv4_occurrences, parse_server_address, parse_wifi_credential, PayloadError,
    PASSWORD_MARKER, SSID_MARKER,
};
pub use domain::scan::ScanAttempt;
