//! Unit tests for the OTP service pipeline

use std::sync::Arc;
use std::time::Duration;

use og_shared::OtpPolicy;

use crate::domain::entities::RecordKind;
use crate::domain::value_objects::{NotificationContext, OtpPurpose};
use crate::errors::OtpError;
use crate::services::otp::OtpService;

use super::mocks::{MockDispatcher, MockStore};

const IDENTITY: &str = "a@x.com";

fn service(
    store: &Arc<MockStore>,
    dispatcher: &Arc<MockDispatcher>,
) -> OtpService<MockStore, MockDispatcher> {
    OtpService::new(store.clone(), dispatcher.clone(), OtpPolicy::default())
}

#[tokio::test(start_paused = true)]
async fn test_second_request_within_cooldown_is_rejected() {
    let store = MockStore::new();
    let dispatcher = MockDispatcher::new(false);
    let service = service(&store, &dispatcher);
    let context = NotificationContext::new();

    service
        .request_otp(OtpPurpose::UserRegistration, IDENTITY, &context)
        .await
        .unwrap();

    tokio::time::advance(Duration::from_secs(30)).await;
    let err = service
        .request_otp(OtpPurpose::UserRegistration, IDENTITY, &context)
        .await
        .unwrap_err();
    assert_eq!(err.as_otp(), Some(&OtpError::CooldownActive));
    assert_eq!(dispatcher.sent_count(), 1);

    // Rejected request neither counted nor reissued
    let counter_key = RecordKind::RequestCount.key_for(OtpPurpose::UserRegistration, IDENTITY);
    assert_eq!(store.value(&counter_key).as_deref(), Some("1"));

    tokio::time::advance(Duration::from_secs(31)).await;
    assert!(service
        .request_otp(OtpPurpose::UserRegistration, IDENTITY, &context)
        .await
        .is_ok());
    assert_eq!(dispatcher.sent_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_third_request_installs_spam_lock_until_it_expires() {
    let store = MockStore::new();
    let dispatcher = MockDispatcher::new(false);
    let service = service(&store, &dispatcher);
    let context = NotificationContext::new();
    let purpose = OtpPurpose::SellerRegistration;

    for _ in 0..2 {
        service.request_otp(purpose, IDENTITY, &context).await.unwrap();
        tokio::time::advance(Duration::from_secs(61)).await;
    }

    let err = service.request_otp(purpose, IDENTITY, &context).await.unwrap_err();
    assert_eq!(
        err.as_otp(),
        Some(&OtpError::RequestRateExceeded {
            retry_after_minutes: 60
        })
    );
    assert_eq!(dispatcher.sent_count(), 2);

    // The guard now reports the spam lock on its own
    tokio::time::advance(Duration::from_secs(61)).await;
    let err = service.request_otp(purpose, IDENTITY, &context).await.unwrap_err();
    assert!(matches!(
        err.as_otp(),
        Some(OtpError::RequestRateExceeded { .. })
    ));

    tokio::time::advance(Duration::from_secs(3600)).await;
    assert!(service.request_otp(purpose, IDENTITY, &context).await.is_ok());
    assert_eq!(dispatcher.sent_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_repeated_wrong_codes_lock_out_even_the_correct_code() {
    let store = MockStore::new();
    let dispatcher = MockDispatcher::new(false);
    let service = service(&store, &dispatcher);
    let purpose = OtpPurpose::PasswordReset;

    service
        .request_otp(purpose, IDENTITY, &NotificationContext::new())
        .await
        .unwrap();
    let code = dispatcher.last_code(IDENTITY).unwrap();

    // Generated codes never start with 0
    for remaining in [3, 2, 1] {
        let err = service.verify(purpose, IDENTITY, "0000").await.unwrap_err();
        assert_eq!(
            err.as_otp(),
            Some(&OtpError::IncorrectOtp {
                remaining_attempts: remaining
            })
        );
    }

    let err = service.verify(purpose, IDENTITY, "0000").await.unwrap_err();
    assert_eq!(
        err.as_otp(),
        Some(&OtpError::AccountLocked {
            retry_after_minutes: 30
        })
    );
    assert_eq!(
        err.to_string(),
        "Account locked due to multiple failed attempts. Try again after 30 minutes"
    );

    let err = service.verify(purpose, IDENTITY, &code).await.unwrap_err();
    assert!(matches!(err.as_otp(), Some(OtpError::AccountLocked { .. })));

    tokio::time::advance(Duration::from_secs(61)).await;
    let err = service
        .request_otp(purpose, IDENTITY, &NotificationContext::new())
        .await
        .unwrap_err();
    assert!(matches!(err.as_otp(), Some(OtpError::AccountLocked { .. })));

    tokio::time::advance(Duration::from_secs(1740)).await;
    let err = service.verify(purpose, IDENTITY, &code).await.unwrap_err();
    assert_eq!(err.as_otp(), Some(&OtpError::InvalidOrExpiredOtp));

    service
        .request_otp(purpose, IDENTITY, &NotificationContext::new())
        .await
        .unwrap();
    let fresh = dispatcher.last_code(IDENTITY).unwrap();
    assert!(service.verify(purpose, IDENTITY, &fresh).await.is_ok());
}

#[tokio::test]
async fn test_purposes_are_isolated() {
    let store = MockStore::new();
    let dispatcher = MockDispatcher::new(false);
    let service = service(&store, &dispatcher);
    let context = NotificationContext::new();

    service
        .request_otp(OtpPurpose::UserRegistration, IDENTITY, &context)
        .await
        .unwrap();
    let registration_code = dispatcher.last_code(IDENTITY).unwrap();

    // Cooldown on one purpose does not block another
    service
        .request_otp(OtpPurpose::PasswordReset, IDENTITY, &context)
        .await
        .unwrap();

    let err = service
        .verify(OtpPurpose::SellerRegistration, IDENTITY, &registration_code)
        .await
        .unwrap_err();
    assert_eq!(err.as_otp(), Some(&OtpError::InvalidOrExpiredOtp));

    assert!(service
        .verify(OtpPurpose::UserRegistration, IDENTITY, &registration_code)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_identities_are_isolated() {
    let store = MockStore::new();
    let dispatcher = MockDispatcher::new(false);
    let service = service(&store, &dispatcher);
    let purpose = OtpPurpose::UserRegistration;

    service
        .request_otp(purpose, "a@x.com", &NotificationContext::new())
        .await
        .unwrap();
    service
        .request_otp(purpose, "b@x.com", &NotificationContext::new())
        .await
        .unwrap();

    let code_b = dispatcher.last_code("b@x.com").unwrap();
    let code_a = dispatcher.last_code("a@x.com").unwrap();
    if code_a != code_b {
        let err = service.verify(purpose, "a@x.com", &code_b).await.unwrap_err();
        assert_eq!(
            err.as_otp(),
            Some(&OtpError::IncorrectOtp {
                remaining_attempts: 3
            })
        );
    }
    assert!(service.verify(purpose, "b@x.com", &code_b).await.is_ok());
}

#[tokio::test]
async fn test_store_failure_surfaces_as_store_error() {
    let store = MockStore::new();
    let dispatcher = MockDispatcher::new(false);
    let service = service(&store, &dispatcher);
    store.set_should_fail(true);

    let err = service
        .request_otp(OtpPurpose::UserRegistration, IDENTITY, &NotificationContext::new())
        .await
        .unwrap_err();
    assert!(err.as_otp().is_none());
    assert_eq!(err.code(), og_shared::error_codes::STORE_ERROR);
    assert_eq!(dispatcher.sent_count(), 0);
}
