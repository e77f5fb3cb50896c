//! Value objects representing immutable domain concepts.

pub mod notification_context;
pub mod purpose;

// Re-export commonly used types
pub use notification_context::NotificationContext;
pub use purpose::OtpPurpose;
