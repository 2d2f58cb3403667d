//! Storage infrastructure: configuration file loading.
//!
//! The `config` sub-module handles:
//!
//! - Locating the TOML configuration file (environment override, per-user
//!   file, system-wide file installed by the package).
//! - Providing defaults for every field so a missing or partial file still
//!   yields a working configuration.
//! - Converting the on-disk schema into the orchestrator's `BootstrapConfig`.

pub mod config;
