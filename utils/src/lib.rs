//! Shared utilities for the governance chambers.

pub mod config;
pub mod logging;

pub use config::{ConfigError, GovernanceConfig};
pub use logging::{init_logging, LogFormat};
