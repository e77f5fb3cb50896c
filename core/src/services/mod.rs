//! Business services containing domain logic and use cases.

pub mod otp;

// Re-export commonly used types
pub use otp::{
    DeliveryStatus, EphemeralStore, IssueReceipt, NotificationDispatcher, OtpLifecycle,
    OtpService, RequestCounter, RequestGuard,
};
