//! Request counter: caps issuances per sliding window and escalates to a spam lock

use std::sync::Arc;

use og_shared::{mask_identity, OtpPolicy};
use tracing::{debug, warn};

use crate::domain::entities::{RecordKind, FLAG_VALUE};
use crate::domain::value_objects::OtpPurpose;
use crate::errors::{DomainResult, OtpError};

use super::store_access;
use super::traits::EphemeralStore;

pub struct RequestCounter<S: EphemeralStore + ?Sized> {
    store: Arc<S>,
    policy: OtpPolicy,
}

impl<S: EphemeralStore + ?Sized> RequestCounter<S> {
    pub fn new(store: Arc<S>, policy: OtpPolicy) -> Self {
        Self { store, policy }
    }

    /// Count one issuance request, returning the new counter value
    ///
    /// Once the counter has reached `max_requests_per_window`, the request is
    /// refused and the spam lock is installed instead. Every accepted request
    /// rewrites the counter with a fresh TTL, so the window slides.
    pub async fn record_request(&self, purpose: OtpPurpose, identity: &str) -> DomainResult<u32> {
        let store = self.store.as_ref();
        let counter_key = RecordKind::RequestCount.key_for(purpose, identity);
        let count = store_access::read_counter(store, &counter_key).await?;

        if count >= self.policy.max_requests_per_window {
            store_access::write(
                store,
                &RecordKind::SpamLock.key_for(purpose, identity),
                FLAG_VALUE,
                self.policy.spam_lock_seconds,
            )
            .await?;

            warn!(
                identity = %mask_identity(identity),
                purpose = %purpose,
                requests = count,
                lock_seconds = self.policy.spam_lock_seconds,
                event = "otp_spam_lock_installed",
                "Too many OTP requests, spam lock installed"
            );
            return Err(OtpError::RequestRateExceeded {
                retry_after_minutes: self.policy.spam_lock_minutes(),
            }
            .into());
        }

        let next = count + 1;
        store_access::write(
            store,
            &counter_key,
            &next.to_string(),
            self.policy.request_window_seconds,
        )
        .await?;

        debug!(
            identity = %mask_identity(identity),
            purpose = %purpose,
            requests = next,
            "OTP request recorded"
        );
        Ok(next)
    }
}
