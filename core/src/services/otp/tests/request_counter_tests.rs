//! Unit tests for the request counter

use std::time::Duration;

use og_shared::OtpPolicy;

use crate::domain::entities::RecordKind;
use crate::domain::value_objects::OtpPurpose;
use crate::errors::OtpError;
use crate::services::otp::traits::EphemeralStore;
use crate::services::otp::RequestCounter;

use super::mocks::MockStore;

const PURPOSE: OtpPurpose = OtpPurpose::SellerRegistration;
const IDENTITY: &str = "seller@shop.com";

fn counter_key() -> String {
    RecordKind::RequestCount.key_for(PURPOSE, IDENTITY)
}

fn spam_key() -> String {
    RecordKind::SpamLock.key_for(PURPOSE, IDENTITY)
}

#[tokio::test(start_paused = true)]
async fn test_third_request_installs_spam_lock() {
    let store = MockStore::new();
    let counter = RequestCounter::new(store.clone(), OtpPolicy::default());

    assert_eq!(counter.record_request(PURPOSE, IDENTITY).await.unwrap(), 1);
    assert_eq!(counter.record_request(PURPOSE, IDENTITY).await.unwrap(), 2);
    assert!(!store.contains(&spam_key()));

    let err = counter.record_request(PURPOSE, IDENTITY).await.unwrap_err();
    assert_eq!(
        err.as_otp(),
        Some(&OtpError::RequestRateExceeded { retry_after_minutes: 60 })
    );
    assert!(store.contains(&spam_key()));
    assert_eq!(store.ttl(&spam_key()), Some(Duration::from_secs(3600)));
    // The rejected request does not advance the counter
    assert_eq!(store.value(&counter_key()).as_deref(), Some("2"));
}

#[tokio::test(start_paused = true)]
async fn test_window_slides_on_every_increment() {
    let store = MockStore::new();
    let counter = RequestCounter::new(store.clone(), OtpPolicy::default());

    counter.record_request(PURPOSE, IDENTITY).await.unwrap();
    tokio::time::advance(Duration::from_secs(3000)).await;
    counter.record_request(PURPOSE, IDENTITY).await.unwrap();

    // TTL was reset by the second request
    assert_eq!(store.ttl(&counter_key()), Some(Duration::from_secs(3600)));

    // Past the first request's original expiry the count survives
    tokio::time::advance(Duration::from_secs(1000)).await;
    assert_eq!(store.value(&counter_key()).as_deref(), Some("2"));
}

#[tokio::test(start_paused = true)]
async fn test_counter_expires_after_quiet_window() {
    let store = MockStore::new();
    let counter = RequestCounter::new(store.clone(), OtpPolicy::default());

    counter.record_request(PURPOSE, IDENTITY).await.unwrap();
    counter.record_request(PURPOSE, IDENTITY).await.unwrap();
    tokio::time::advance(Duration::from_secs(3601)).await;

    assert_eq!(counter.record_request(PURPOSE, IDENTITY).await.unwrap(), 1);
}

#[tokio::test]
async fn test_corrupt_counter_counts_as_zero() {
    let store = MockStore::new();
    store.set(&counter_key(), "not-a-number", 3600).await.unwrap();
    let counter = RequestCounter::new(store.clone(), OtpPolicy::default());

    assert_eq!(counter.record_request(PURPOSE, IDENTITY).await.unwrap(), 1);
}

#[tokio::test]
async fn test_custom_request_budget() {
    let store = MockStore::new();
    let policy = OtpPolicy {
        max_requests_per_window: 5,
        ..Default::default()
    };
    let counter = RequestCounter::new(store.clone(), policy);

    for expected in 1..=5 {
        assert_eq!(counter.record_request(PURPOSE, IDENTITY).await.unwrap(), expected);
    }
    assert!(counter.record_request(PURPOSE, IDENTITY).await.is_err());
}
