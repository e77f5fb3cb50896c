//! Types for OTP service results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::OtpPurpose;

/// Outcome of handing a code to the notification dispatcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// The dispatcher accepted the message
    Sent { message_id: String },
    /// The dispatcher failed; the code was stored anyway
    Failed { reason: String },
}

impl DeliveryStatus {
    pub fn is_sent(&self) -> bool {
        matches!(self, DeliveryStatus::Sent { .. })
    }
}

/// Result of issuing a code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueReceipt {
    /// Flow the code was issued for
    pub purpose: OtpPurpose,
    /// What happened to the delivery
    pub delivery: DeliveryStatus,
    /// When the code was stored
    pub issued_at: DateTime<Utc>,
    /// When the pending code expires
    pub expires_at: DateTime<Utc>,
    /// When the cooldown lifts and another code may be requested
    pub next_request_at: DateTime<Utc>,
}
