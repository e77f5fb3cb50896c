//! # Infrastructure Layer
//!
//! Concrete adapters for the OTP services in `og_core`:
//! - **Cache**: Redis client, the Redis-backed ephemeral store and an
//!   in-process store for development and tests
//! - **Notify**: notification dispatchers (log-only by default)
//! - **Config**: layered configuration loading
//! - **Telemetry**: tracing subscriber setup

// Re-export core types for convenience
pub use og_core::errors::*;

/// Cache module - Redis client and ephemeral store adapters
pub mod cache;

/// Notification dispatchers
pub mod notify;

/// Configuration loading
pub mod config;

/// Tracing subscriber initialisation
pub mod telemetry;

use og_shared::error_codes;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Notification dispatch error
    #[error("Notification error: {0}")]
    Notification(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl InfrastructureError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            InfrastructureError::Cache(_) => error_codes::STORE_ERROR,
            InfrastructureError::Notification(_) => error_codes::OTP_DELIVERY_FAILED,
            InfrastructureError::Config(_) | InfrastructureError::General(_) => {
                error_codes::INTERNAL_ERROR
            }
        }
    }
}

impl From<::config::ConfigError> for InfrastructureError {
    fn from(err: ::config::ConfigError) -> Self {
        InfrastructureError::Config(err.to_string())
    }
}
