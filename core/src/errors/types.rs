//! OTP outcome errors
//!
//! Guard rejections (`CooldownActive`, `AccountLocked`, `RequestRateExceeded`)
//! clear up by themselves once the matching store record expires. Verification
//! rejections (`InvalidOrExpiredOtp`, `IncorrectOtp`) are retried with another
//! code or a fresh issuance.

use og_shared::error_codes;
use thiserror::Error;

/// Rejections produced by the OTP state machine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("Please wait before requesting another OTP")]
    CooldownActive,

    #[error("Account locked due to multiple failed attempts. Try again after {retry_after_minutes} minutes")]
    AccountLocked { retry_after_minutes: u64 },

    #[error("Too many OTP requests. Please try again after {retry_after_minutes} minutes")]
    RequestRateExceeded { retry_after_minutes: u64 },

    #[error("Invalid OTP, please try again")]
    InvalidOrExpiredOtp,

    #[error("Incorrect OTP. {remaining_attempts} attempts left")]
    IncorrectOtp { remaining_attempts: u32 },

    #[error("Failed to deliver OTP: {reason}")]
    DeliveryFailed { reason: String },
}

impl OtpError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            OtpError::CooldownActive => error_codes::OTP_COOLDOWN_ACTIVE,
            OtpError::AccountLocked { .. } => error_codes::OTP_ACCOUNT_LOCKED,
            OtpError::RequestRateExceeded { .. } => error_codes::OTP_RATE_LIMIT_EXCEEDED,
            OtpError::InvalidOrExpiredOtp => error_codes::OTP_INVALID_OR_EXPIRED,
            OtpError::IncorrectOtp { .. } => error_codes::OTP_INCORRECT,
            OtpError::DeliveryFailed { .. } => error_codes::OTP_DELIVERY_FAILED,
        }
    }

    /// Whether the caller only has to wait for a lock or cooldown to expire
    pub fn is_retryable_by_waiting(&self) -> bool {
        matches!(
            self,
            OtpError::CooldownActive
                | OtpError::AccountLocked { .. }
                | OtpError::RequestRateExceeded { .. }
        )
    }
}
