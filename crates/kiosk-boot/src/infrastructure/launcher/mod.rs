//! Browser launcher adapters.

pub mod command;
pub mod mock;

pub use command::CommandLauncher;
