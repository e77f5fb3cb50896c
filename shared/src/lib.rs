//! Shared configuration and helpers for the OtpGuard workspace
//!
//! This crate provides common functionality used across all workspace members:
//! - Configuration types (OTP policy, Redis, environment, logging)
//! - Stable error codes
//! - Identity masking for logs

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, Environment, LogFormat, LoggingConfig, NotificationConfig, OtpPolicy,
};
pub use errors::error_codes;
pub use utils::mask_identity;
