//! QR reader adapters.

pub mod mock;
pub mod zbar;

pub use zbar::ZbarQrReader;
