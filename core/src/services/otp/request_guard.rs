//! Request guard: decides whether a new code may be issued

use std::sync::Arc;

use og_shared::{mask_identity, OtpPolicy};
use tracing::{debug, warn};

use crate::domain::entities::RecordKind;
use crate::domain::value_objects::OtpPurpose;
use crate::errors::{DomainResult, OtpError};

use super::store_access;
use super::traits::EphemeralStore;

/// Read-only gate in front of issuance
///
/// Checks the cooldown marker, the account lock and the spam lock, in that
/// order. The order decides which rejection is reported when several markers
/// are present at once.
pub struct RequestGuard<S: EphemeralStore + ?Sized> {
    store: Arc<S>,
    policy: OtpPolicy,
}

impl<S: EphemeralStore + ?Sized> RequestGuard<S> {
    pub fn new(store: Arc<S>, policy: OtpPolicy) -> Self {
        Self { store, policy }
    }

    /// Fail if any restriction is active for this identity; no side effects
    pub async fn check_restriction(&self, purpose: OtpPurpose, identity: &str) -> DomainResult<()> {
        let store = self.store.as_ref();

        if store_access::is_present(store, &RecordKind::Cooldown.key_for(purpose, identity)).await? {
            warn!(
                identity = %mask_identity(identity),
                purpose = %purpose,
                event = "otp_cooldown_active",
                "OTP requested again before the cooldown elapsed"
            );
            return Err(OtpError::CooldownActive.into());
        }

        if store_access::is_present(store, &RecordKind::AccountLock.key_for(purpose, identity)).await? {
            warn!(
                identity = %mask_identity(identity),
                purpose = %purpose,
                event = "otp_request_while_locked",
                "OTP requested for a locked account"
            );
            return Err(OtpError::AccountLocked {
                retry_after_minutes: self.policy.account_lock_minutes(),
            }
            .into());
        }

        if store_access::is_present(store, &RecordKind::SpamLock.key_for(purpose, identity)).await? {
            warn!(
                identity = %mask_identity(identity),
                purpose = %purpose,
                event = "otp_request_while_spam_locked",
                "OTP requested while the spam lock is active"
            );
            return Err(OtpError::RequestRateExceeded {
                retry_after_minutes: self.policy.spam_lock_minutes(),
            }
            .into());
        }

        debug!(
            identity = %mask_identity(identity),
            purpose = %purpose,
            "No OTP restriction active"
        );
        Ok(())
    }
}
