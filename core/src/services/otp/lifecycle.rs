//! OTP lifecycle: generate, store, deliver and verify codes

use std::sync::Arc;

use chrono::{Duration, Utc};
use og_shared::{mask_identity, OtpPolicy};
use tracing::{debug, error, info, warn};

use crate::domain::entities::{OtpCode, RecordKind, FLAG_VALUE};
use crate::domain::value_objects::{NotificationContext, OtpPurpose};
use crate::errors::{DomainResult, OtpError};

use super::store_access;
use super::traits::{EphemeralStore, NotificationDispatcher};
use super::types::{DeliveryStatus, IssueReceipt};

/// Issues and verifies codes, and locks the account after repeated mismatches
///
/// `issue` does not consult the request guard or counter; callers run those
/// first (see `OtpService::request_otp`).
pub struct OtpLifecycle<S: EphemeralStore + ?Sized, N: NotificationDispatcher + ?Sized> {
    store: Arc<S>,
    dispatcher: Arc<N>,
    policy: OtpPolicy,
}

impl<S, N> OtpLifecycle<S, N>
where
    S: EphemeralStore + ?Sized,
    N: NotificationDispatcher + ?Sized,
{
    pub fn new(store: Arc<S>, dispatcher: Arc<N>, policy: OtpPolicy) -> Self {
        Self {
            store,
            dispatcher,
            policy,
        }
    }

    /// Generate a code, deliver it, then store it alongside the cooldown marker
    ///
    /// A new code replaces any pending one for the same purpose and identity.
    /// Delivery failures are reported on the receipt unless the policy asks for
    /// `fail_on_delivery_error`, in which case nothing is written and the call
    /// fails with `DeliveryFailed`.
    pub async fn issue(
        &self,
        purpose: OtpPurpose,
        identity: &str,
        context: &NotificationContext,
    ) -> DomainResult<IssueReceipt> {
        let code = OtpCode::generate();
        let masked = mask_identity(identity);

        let delivery = match self
            .dispatcher
            .send(identity, code.as_str(), purpose, context)
            .await
        {
            Ok(message_id) => DeliveryStatus::Sent { message_id },
            Err(reason) => {
                error!(
                    identity = %masked,
                    purpose = %purpose,
                    provider = self.dispatcher.provider_name(),
                    error = %reason,
                    event = "otp_delivery_failed",
                    "Failed to deliver OTP"
                );
                if self.policy.fail_on_delivery_error {
                    return Err(OtpError::DeliveryFailed { reason }.into());
                }
                DeliveryStatus::Failed { reason }
            }
        };

        let store = self.store.as_ref();
        store_access::write(
            store,
            &RecordKind::PendingOtp.key_for(purpose, identity),
            code.as_str(),
            self.policy.code_ttl_seconds,
        )
        .await?;
        store_access::write(
            store,
            &RecordKind::Cooldown.key_for(purpose, identity),
            FLAG_VALUE,
            self.policy.cooldown_seconds,
        )
        .await?;

        let issued_at = Utc::now();
        info!(
            identity = %masked,
            purpose = %purpose,
            delivered = delivery.is_sent(),
            ttl_seconds = self.policy.code_ttl_seconds,
            event = "otp_issued",
            "Issued OTP"
        );

        Ok(IssueReceipt {
            purpose,
            delivery,
            issued_at,
            expires_at: issued_at + seconds(self.policy.code_ttl_seconds),
            next_request_at: issued_at + seconds(self.policy.cooldown_seconds),
        })
    }

    /// Check a submitted code against the pending one
    ///
    /// A match consumes the code. A mismatch bumps the attempt counter; once
    /// the counter read before this submission has reached
    /// `max_failed_attempts`, the account lock is set and the pending code and
    /// counter are dropped. The remaining-attempts figure is computed from the
    /// counter before it is incremented, so one more wrong submission is
    /// accepted than the first message announces.
    pub async fn verify(&self, purpose: OtpPurpose, identity: &str, submitted: &str) -> DomainResult<()> {
        let store = self.store.as_ref();
        let masked = mask_identity(identity);
        let otp_key = RecordKind::PendingOtp.key_for(purpose, identity);
        let attempts_key = RecordKind::FailedAttempts.key_for(purpose, identity);

        let stored = match store_access::read(store, &otp_key).await? {
            Some(value) => OtpCode::from_stored(value),
            None => {
                debug!(
                    identity = %masked,
                    purpose = %purpose,
                    event = "otp_not_pending",
                    "No pending OTP (never issued, consumed or expired)"
                );
                return Err(OtpError::InvalidOrExpiredOtp.into());
            }
        };

        let attempts = store_access::read_counter(store, &attempts_key).await?;

        if stored.matches(submitted) {
            store_access::remove(store, &[otp_key, attempts_key]).await?;
            info!(
                identity = %masked,
                purpose = %purpose,
                event = "otp_verified",
                "OTP verified"
            );
            return Ok(());
        }

        if attempts >= self.policy.max_failed_attempts {
            store_access::write(
                store,
                &RecordKind::AccountLock.key_for(purpose, identity),
                FLAG_VALUE,
                self.policy.account_lock_seconds,
            )
            .await?;
            store_access::remove(store, &[otp_key, attempts_key]).await?;

            warn!(
                identity = %masked,
                purpose = %purpose,
                lock_seconds = self.policy.account_lock_seconds,
                event = "otp_account_locked",
                "Too many wrong OTP submissions, account locked"
            );
            return Err(OtpError::AccountLocked {
                retry_after_minutes: self.policy.account_lock_minutes(),
            }
            .into());
        }

        store_access::write(
            store,
            &attempts_key,
            &(attempts + 1).to_string(),
            self.policy.attempts_ttl_seconds,
        )
        .await?;

        let remaining_attempts = self.policy.max_failed_attempts.saturating_sub(attempts);
        warn!(
            identity = %masked,
            purpose = %purpose,
            failed_attempts = attempts + 1,
            remaining_attempts = remaining_attempts,
            event = "otp_mismatch",
            "Incorrect OTP submitted"
        );
        Err(OtpError::IncorrectOtp { remaining_attempts }.into())
    }
}

fn seconds(value: u64) -> Duration {
    Duration::seconds(value.min(u64::from(u32::MAX)) as i64)
}
