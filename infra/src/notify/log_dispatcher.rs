//! Log-only notification dispatcher
//!
//! Records each delivery through `tracing` instead of contacting a provider.
//! The code itself only appears at `debug` level, and only when
//! `reveal_codes` is enabled.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use og_core::{NotificationContext, NotificationDispatcher, OtpPurpose};
use og_shared::mask_identity;

/// Dispatcher that writes deliveries to the log
///
/// Clones share the message counter and failure switch.
#[derive(Clone, Default)]
pub struct LogDispatcher {
    /// Number of messages delivered
    message_count: Arc<AtomicU64>,
    /// Fail every delivery (for testing)
    simulate_failure: Arc<AtomicBool>,
    /// Include the code in the debug event
    reveal_codes: bool,
}

impl LogDispatcher {
    pub fn new(reveal_codes: bool) -> Self {
        Self {
            reveal_codes,
            ..Default::default()
        }
    }

    /// Total number of messages delivered
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }
}

#[async_trait]
impl NotificationDispatcher for LogDispatcher {
    async fn send(
        &self,
        identity: &str,
        code: &str,
        purpose: OtpPurpose,
        context: &NotificationContext,
    ) -> Result<String, String> {
        let masked = mask_identity(identity);

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(
                identity = %masked,
                provider = self.provider_name(),
                "Log dispatcher simulating delivery failure"
            );
            return Err("Simulated delivery failure".to_string());
        }

        let message_id = format!("log_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.reveal_codes {
            debug!(
                identity = %masked,
                purpose = %purpose,
                code = code,
                template = context.template.as_deref().unwrap_or("default"),
                "OTP delivery content"
            );
        }

        info!(
            identity = %masked,
            purpose = %purpose,
            provider = self.provider_name(),
            message_id = %message_id,
            message_number = count,
            variables = context.variables.len(),
            event = "otp_dispatched",
            "OTP delivered (log)"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "log"
    }
}
