//! One-time code entity.

use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use std::fmt;

/// Number of digits in a code
pub const CODE_LENGTH: usize = 4;

/// Smallest code ever generated; leading zeros are never produced
pub const CODE_MIN: u32 = 1000;

/// Largest code ever generated
pub const CODE_MAX: u32 = 9999;

/// A short numeric code delivered to an identity
///
/// The value never shows up in `Debug` output so that codes do not leak into
/// logs through `?code` fields.
#[derive(Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// Generate a uniformly random code in `CODE_MIN..=CODE_MAX` using the OS CSPRNG
    pub fn generate() -> Self {
        let value = OsRng.gen_range(CODE_MIN..=CODE_MAX);
        Self(value.to_string())
    }

    /// Wrap a code read back from the store
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The code as stored and delivered
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare a submitted code against this one
    ///
    /// Both sides are trimmed; the comparison is textual and constant time.
    pub fn matches(&self, submitted: &str) -> bool {
        let expected = self.0.trim();
        let submitted = submitted.trim();
        if expected.len() != submitted.len() {
            return false;
        }
        constant_time_eq(expected.as_bytes(), submitted.as_bytes())
    }
}

impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OtpCode(****)")
    }
}
