//! Traits for the ephemeral store and notification dispatcher collaborators

use async_trait::async_trait;

use crate::domain::value_objects::{NotificationContext, OtpPurpose};

/// Key-value store whose entries expire
///
/// Must be shared by every process that runs the OTP services; an in-process
/// map only coordinates a single instance.
#[async_trait]
pub trait EphemeralStore: Send + Sync {
    /// Read a value; expired and missing keys both read as `None`
    async fn get(&self, key: &str) -> Result<Option<String>, String>;
    /// Write a value that expires after `ttl_seconds`, replacing any previous value and TTL
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String>;
    /// Delete keys; missing keys are ignored
    async fn delete(&self, keys: &[String]) -> Result<(), String>;
}

/// Delivers a code to an identity
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Deliver `code` to `identity`, returning a provider message id
    async fn send(
        &self,
        identity: &str,
        code: &str,
        purpose: OtpPurpose,
        context: &NotificationContext,
    ) -> Result<String, String>;

    /// Name of the delivery provider, for logs
    fn provider_name(&self) -> &str;
}
