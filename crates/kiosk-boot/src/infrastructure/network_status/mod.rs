//! Network status probe adapters.

pub mod ip_command;
pub mod mock;

pub use ip_command::IpCommandProbe;
