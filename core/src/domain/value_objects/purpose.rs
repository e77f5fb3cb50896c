//! Flow an OTP gates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The flow a code was issued for
///
/// Part of every store key, so a password reset and a registration for the
/// same address never share a code, counter or lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpPurpose {
    UserRegistration,
    SellerRegistration,
    PasswordReset,
}

impl OtpPurpose {
    pub const ALL: [OtpPurpose; 3] = [
        OtpPurpose::UserRegistration,
        OtpPurpose::SellerRegistration,
        OtpPurpose::PasswordReset,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OtpPurpose::UserRegistration => "user_registration",
            OtpPurpose::SellerRegistration => "seller_registration",
            OtpPurpose::PasswordReset => "password_reset",
        }
    }
}

impl fmt::Display for OtpPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OtpPurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OtpPurpose::ALL
            .into_iter()
            .find(|purpose| purpose.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| format!("Unknown OTP purpose: {}", s))
    }
}
