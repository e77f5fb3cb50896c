//! Walks through the OTP flow: issue, cooldown, wrong codes, lockout
//!
//! Uses Redis when `REDIS_URL` is set and reachable, the in-process store
//! otherwise.
//!
//! Run with: cargo run -p og_infra --example otp_flow_demo

use std::sync::Arc;

use anyhow::Context;
use og_core::{EphemeralStore, NotificationContext, OtpPurpose, OtpService, RecordKind};
use og_infra::cache::{MemoryEphemeralStore, RedisClient, RedisEphemeralStore};
use og_infra::config::load_config;
use og_infra::notify::create_dispatcher;
use og_infra::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().context("loading configuration")?;
    init_tracing(&config.logging)?;

    println!("OTP Flow Demo");
    println!("=============\n");

    let store: Arc<dyn EphemeralStore> = if std::env::var("REDIS_URL").is_ok() {
        let client = RedisClient::new(config.cache.clone())
            .await
            .context("connecting to Redis")?;
        println!("Using Redis store\n");
        Arc::new(RedisEphemeralStore::new(client))
    } else {
        println!("Using in-process store\n");
        Arc::new(MemoryEphemeralStore::new())
    };

    let dispatcher = create_dispatcher(&config.notification);
    let service = OtpService::new(store.clone(), dispatcher, config.otp.clone());

    let purpose = OtpPurpose::PasswordReset;
    let identity = "a@x.com";
    let context = NotificationContext::new().with_variable("name", "Ada");

    // 1. Issue a code
    let receipt = service.request_otp(purpose, identity, &context).await?;
    println!(
        "1. Issued code for {} (expires at {}, delivery: {:?})",
        purpose, receipt.expires_at, receipt.delivery
    );

    // 2. Immediate second request hits the cooldown
    match service.request_otp(purpose, identity, &context).await {
        Ok(_) => println!("2. Second request unexpectedly accepted"),
        Err(e) => println!("2. Second request rejected: {}", e),
    }

    // 3. Wrong codes until the account locks
    for attempt in 1..=4 {
        match service.verify(purpose, identity, "0000").await {
            Ok(()) => println!("3.{} Wrong code accepted?", attempt),
            Err(e) => println!("3.{} {} [{}]", attempt, e, e.code()),
        }
    }

    // 4. The lock wins even over the right code
    let pending = store
        .get(&RecordKind::PendingOtp.key_for(purpose, identity))
        .await
        .map_err(anyhow::Error::msg)?;
    println!("4. Pending code after lockout: {:?}", pending);
    if let Err(e) = service.verify(purpose, identity, "1234").await {
        println!("   Verify while locked: {}", e);
    }

    println!("\nDemo completed");
    Ok(())
}
