//! Integration tests for the Redis-backed ephemeral store
//!
//! These tests require a running Redis instance to execute.
//! Run with: cargo test -p og_infra --test redis_integration -- --ignored

use std::sync::Arc;

use async_trait::async_trait;
use og_core::{EphemeralStore, NotificationContext, NotificationDispatcher, OtpError, OtpPurpose, OtpService};
use og_infra::cache::{CacheConfig, RedisClient, RedisEphemeralStore};
use og_shared::OtpPolicy;
use rand::Rng;

struct FixedCode;

#[async_trait]
impl NotificationDispatcher for FixedCode {
    async fn send(
        &self,
        _identity: &str,
        _code: &str,
        _purpose: OtpPurpose,
        _context: &NotificationContext,
    ) -> Result<String, String> {
        Ok("fixed".to_string())
    }

    fn provider_name(&self) -> &str {
        "fixed"
    }
}

async fn store() -> RedisEphemeralStore {
    let suffix: u32 = rand::thread_rng().gen();
    let config = CacheConfig::new(
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
    )
    .with_prefix(format!("og_test_{}", suffix));

    RedisEphemeralStore::new(RedisClient::new(config).await.expect("Failed to connect to Redis"))
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_set_get_delete() {
    let store = store().await;

    store.set("otp:password_reset:a@x.com", "4821", 300).await.unwrap();
    assert_eq!(
        store.get("otp:password_reset:a@x.com").await.unwrap(),
        Some("4821".to_string())
    );

    store
        .delete(&["otp:password_reset:a@x.com".to_string(), "attempts:password_reset:a@x.com".to_string()])
        .await
        .unwrap();
    assert_eq!(store.get("otp:password_reset:a@x.com").await.unwrap(), None);
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_key_expires() {
    let store = store().await;

    store.set("cooldown:user_registration:a@x.com", "1", 1).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(1500)).await;
    assert_eq!(store.get("cooldown:user_registration:a@x.com").await.unwrap(), None);
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_lockout_over_redis() {
    let store = Arc::new(store().await);
    let service = OtpService::new(store.clone(), Arc::new(FixedCode), OtpPolicy::default());

    service
        .request_otp(OtpPurpose::PasswordReset, "a@x.com", &NotificationContext::new())
        .await
        .unwrap();

    for _ in 0..3 {
        let err = service
            .verify(OtpPurpose::PasswordReset, "a@x.com", "0000")
            .await
            .unwrap_err();
        assert!(matches!(err.as_otp(), Some(OtpError::IncorrectOtp { .. })));
    }
    let err = service
        .verify(OtpPurpose::PasswordReset, "a@x.com", "0000")
        .await
        .unwrap_err();
    assert!(matches!(err.as_otp(), Some(OtpError::AccountLocked { .. })));

    store
        .delete(&[
            "lock:password_reset:a@x.com".to_string(),
            "cooldown:password_reset:a@x.com".to_string(),
            "reqcount:password_reset:a@x.com".to_string(),
        ])
        .await
        .unwrap();
}
