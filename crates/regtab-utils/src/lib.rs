//! Shared utilities for regtab
//!
//! Logging setup and the configuration layer used by the `regtab` binary.
//! The table library itself never reads the environment.

pub mod config;
pub mod logging;

pub use config::Config;
pub use logging::init_tracing;
