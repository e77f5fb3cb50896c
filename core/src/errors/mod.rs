//! Domain error types and error handling.

mod types;


pub use types::OtpError;

use og_shared::error_codes;
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Otp(#[from] OtpError),

    /// The ephemeral store could not be reached or rejected a command
    #[error("Store error: {message}")]
    Store { message: String },
}

impl DomainError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Otp(err) => err.code(),
            DomainError::Store { .. } => error_codes::STORE_ERROR,
        }
    }

    /// The OTP rejection, if this is one
    pub fn as_otp(&self) -> Option<&OtpError> {
        match self {
            DomainError::Otp(err) => Some(err),
            DomainError::Store { .. } => None,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
