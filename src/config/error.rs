//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid page size")]
    InvalidPageSize,

    #[error("Invalid fetch timeout")]
    InvalidTimeout,

    #[error("Invalid trigger cool-down")]
    InvalidCooldown,
}
