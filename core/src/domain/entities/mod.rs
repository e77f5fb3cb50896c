//! Domain entities representing the records of the OTP state machine.

pub mod otp_code;
pub mod record;

// Re-export commonly used types
pub use otp_code::{OtpCode, CODE_LENGTH, CODE_MAX, CODE_MIN};
pub use record::{RecordKind, FLAG_VALUE};
