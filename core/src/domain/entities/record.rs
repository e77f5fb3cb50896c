//! Store records making up the per-identity state machine.
//!
//! Every record lives under `{kind}:{purpose}:{identity}`. Expiry is the only
//! way a record disappears, apart from the explicit deletions of the pending
//! OTP and the attempt counter on successful verification or lockout.

use crate::domain::value_objects::OtpPurpose;

/// Value written for flag records (cooldown, spam lock, account lock)
pub const FLAG_VALUE: &str = "1";

/// Kinds of record kept in the ephemeral store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Short marker blocking immediate re-issuance
    Cooldown,
    /// Marker set after too many issuance requests
    SpamLock,
    /// Number of issuances in the current sliding window
    RequestCount,
    /// Marker set after too many wrong verification attempts
    AccountLock,
    /// The code awaiting verification
    PendingOtp,
    /// Number of wrong submissions against the pending code
    FailedAttempts,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Cooldown => "cooldown",
            RecordKind::SpamLock => "spamlock",
            RecordKind::RequestCount => "reqcount",
            RecordKind::AccountLock => "lock",
            RecordKind::PendingOtp => "otp",
            RecordKind::FailedAttempts => "attempts",
        }
    }

    /// Store key for this record
    pub fn key_for(&self, purpose: OtpPurpose, identity: &str) -> String {
        format!("{}:{}:{}", self.as_str(), purpose.as_str(), identity)
    }
}
