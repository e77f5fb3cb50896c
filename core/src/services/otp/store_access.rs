//! Store helpers mapping collaborator failures onto `DomainError::Store`

use og_shared::mask_identity;
use tracing::{error, warn};

use crate::errors::{DomainError, DomainResult};

use super::traits::EphemeralStore;

pub(crate) async fn read<S: EphemeralStore + ?Sized>(
    store: &S,
    key: &str,
) -> DomainResult<Option<String>> {
    store
        .get(key)
        .await
        .map_err(|e| store_error("read", redact_key(key), e))
}

pub(crate) async fn is_present<S: EphemeralStore + ?Sized>(
    store: &S,
    key: &str,
) -> DomainResult<bool> {
    Ok(read(store, key).await?.is_some())
}

/// Read a counter record; absent or unparsable values count as zero
pub(crate) async fn read_counter<S: EphemeralStore + ?Sized>(
    store: &S,
    key: &str,
) -> DomainResult<u32> {
    match read(store, key).await? {
        Some(raw) => Ok(raw.trim().parse().unwrap_or_else(|_| {
            warn!(
                key = %redact_key(key),
                event = "store_counter_corrupt",
                "Counter record is not an integer, treating it as zero"
            );
            0
        })),
        None => Ok(0),
    }
}

pub(crate) async fn write<S: EphemeralStore + ?Sized>(
    store: &S,
    key: &str,
    value: &str,
    ttl_seconds: u64,
) -> DomainResult<()> {
    store
        .set(key, value, ttl_seconds)
        .await
        .map_err(|e| store_error("write", redact_key(key), e))
}

pub(crate) async fn remove<S: EphemeralStore + ?Sized>(
    store: &S,
    keys: &[String],
) -> DomainResult<()> {
    store
        .delete(keys)
        .await
        .map_err(|e| store_error("delete", redact_keys(keys), e))
}

fn store_error(operation: &str, key: String, e: String) -> DomainError {
    error!(
        key = %key,
        operation = operation,
        error = %e,
        event = "store_failure",
        "Ephemeral store operation failed"
    );
    DomainError::Store {
        message: format!("Failed to {} '{}': {}", operation, key, e),
    }
}

/// Mask the identity segment of a `{kind}:{purpose}:{identity}` key
fn redact_key(key: &str) -> String {
    match key.splitn(3, ':').collect::<Vec<_>>().as_slice() {
        [kind, purpose, identity] => format!("{}:{}:{}", kind, purpose, mask_identity(identity)),
        _ => key.to_string(),
    }
}

/// Mask each key on its own, then join them for the log line
fn redact_keys(keys: &[String]) -> String {
    keys.iter()
        .map(|key| redact_key(key))
        .collect::<Vec<_>>()
        .join(",")
}
