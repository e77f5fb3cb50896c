//! OTP issuance and verification
//!
//! Three cooperating sub-machines share one identity key and keep all of their
//! state in the ephemeral store:
//! - `RequestGuard` refuses issuance during a cooldown, account lock or spam lock
//! - `RequestCounter` caps issuances per sliding window and installs the spam lock
//! - `OtpLifecycle` issues codes, verifies them and installs the account lock
//!
//! The read-then-write sequences in the counter and in verification are not
//! atomic. Two concurrent submissions for the same identity may both read the
//! same attempt count.

mod lifecycle;
mod request_counter;
mod request_guard;
mod service;
mod store_access;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use lifecycle::OtpLifecycle;
pub use request_counter::RequestCounter;
pub use request_guard::RequestGuard;
pub use service::OtpService;
pub use traits::{EphemeralStore, NotificationDispatcher};
pub use types::{DeliveryStatus, IssueReceipt};
