//! OTP service façade wiring the guard, counter and lifecycle together

use std::sync::Arc;

use og_shared::{mask_identity, OtpPolicy};
use tracing::warn;

use crate::domain::entities::RecordKind;
use crate::domain::value_objects::{NotificationContext, OtpPurpose};
use crate::errors::{DomainResult, OtpError};

use super::lifecycle::OtpLifecycle;
use super::request_counter::RequestCounter;
use super::request_guard::RequestGuard;
use super::store_access;
use super::traits::{EphemeralStore, NotificationDispatcher};
use super::types::IssueReceipt;

/// Entry point for issuing and verifying codes
///
/// Holds no state of its own beyond handles to the collaborators, so one
/// instance can be shared across request handlers, and several processes can
/// run side by side against the same store.
pub struct OtpService<S: EphemeralStore + ?Sized, N: NotificationDispatcher + ?Sized> {
    store: Arc<S>,
    policy: OtpPolicy,
    guard: RequestGuard<S>,
    counter: RequestCounter<S>,
    lifecycle: OtpLifecycle<S, N>,
}

impl<S, N> OtpService<S, N>
where
    S: EphemeralStore + ?Sized,
    N: NotificationDispatcher + ?Sized,
{
    /// Create a new OTP service
    ///
    /// # Arguments
    ///
    /// * `store` - Shared ephemeral store
    /// * `dispatcher` - Notification dispatcher used to deliver codes
    /// * `policy` - TTLs and thresholds
    pub fn new(store: Arc<S>, dispatcher: Arc<N>, policy: OtpPolicy) -> Self {
        Self {
            guard: RequestGuard::new(store.clone(), policy.clone()),
            counter: RequestCounter::new(store.clone(), policy.clone()),
            lifecycle: OtpLifecycle::new(store.clone(), dispatcher, policy.clone()),
            store,
            policy,
        }
    }

    /// Run the full issuance pipeline: guard, counter, then issue
    ///
    /// Nothing is generated or delivered when the guard or the counter
    /// rejects the request.
    pub async fn request_otp(
        &self,
        purpose: OtpPurpose,
        identity: &str,
        context: &NotificationContext,
    ) -> DomainResult<IssueReceipt> {
        self.guard.check_restriction(purpose, identity).await?;
        self.counter.record_request(purpose, identity).await?;
        self.lifecycle.issue(purpose, identity, context).await
    }

    /// Verify a submitted code
    ///
    /// An active account lock wins over everything else, including a correct
    /// code.
    pub async fn verify(&self, purpose: OtpPurpose, identity: &str, submitted: &str) -> DomainResult<()> {
        let lock_key = RecordKind::AccountLock.key_for(purpose, identity);
        if store_access::is_present(self.store.as_ref(), &lock_key).await? {
            warn!(
                identity = %mask_identity(identity),
                purpose = %purpose,
                event = "otp_verify_while_locked",
                "OTP submitted for a locked account"
            );
            return Err(OtpError::AccountLocked {
                retry_after_minutes: self.policy.account_lock_minutes(),
            }
            .into());
        }

        self.lifecycle.verify(purpose, identity, submitted).await
    }

    /// The request guard, for callers driving the two issuance phases themselves
    pub fn guard(&self) -> &RequestGuard<S> {
        &self.guard
    }

    /// The request counter, for callers driving the two issuance phases themselves
    pub fn counter(&self) -> &RequestCounter<S> {
        &self.counter
    }

    /// The lifecycle, for callers driving the two issuance phases themselves
    pub fn lifecycle(&self) -> &OtpLifecycle<S, N> {
        &self.lifecycle
    }

    pub fn policy(&self) -> &OtpPolicy {
        &self.policy
    }
}
