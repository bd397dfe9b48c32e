//! Error types for router configuration and construction.
//!
//! Routing itself never fails: unknown task types and malformed constraints
//! degrade to defaults. Errors only come from loading or validating config.
use std::io;
use std::result::Result as StdResult;
use thiserror::Error;

/// Result type alias using `RoutingError`.
pub type Result<T> = StdResult<T, RoutingError>;

/// Errors raised while configuring a router.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Tier threshold bands leave a gap, overlap, or miss part of `[0, 100]`
    #[error("Invalid tier bands: {0}")]
    InvalidBands(String),

    /// A configuration value is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl RoutingError {
    /// Checks if this error was caused by invalid configuration values.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidBands(_) | Self::InvalidConfig(_))
    }
}
