//! Core domain errors.

use thiserror::Error;

/// Core domain errors for ecsctl.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Environment variable not in `KEY=VALUE` form.
    #[error("Invalid environment variable '{0}': expected KEY=VALUE")]
    InvalidEnvVar(String),

    /// Invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
