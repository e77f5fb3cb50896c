//! Stable error codes shared by every crate
//!
//! Callers map these onto their own transport (HTTP status, RPC code, ...).

/// Error codes for OTP outcomes
pub mod error_codes {
    pub const OTP_COOLDOWN_ACTIVE: &str = "OTP_COOLDOWN_ACTIVE";
    pub const OTP_ACCOUNT_LOCKED: &str = "OTP_ACCOUNT_LOCKED";
    pub const OTP_RATE_LIMIT_EXCEEDED: &str = "OTP_RATE_LIMIT_EXCEEDED";
    pub const OTP_INVALID_OR_EXPIRED: &str = "OTP_INVALID_OR_EXPIRED";
    pub const OTP_INCORRECT: &str = "OTP_INCORRECT";
    pub const OTP_DELIVERY_FAILED: &str = "OTP_DELIVERY_FAILED";
    pub const STORE_ERROR: &str = "STORE_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}
