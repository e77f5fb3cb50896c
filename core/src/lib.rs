//! # OtpGuard Core
//!
//! OTP issuance-and-verification abuse prevention. The crate holds no
//! in-process state: cooldowns, spam locks, attempt counters and account locks
//! are all expiring records in a shared ephemeral store, reached through the
//! `EphemeralStore` trait. Codes are delivered through `NotificationDispatcher`.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
