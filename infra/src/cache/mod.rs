//! Ephemeral store adapters
//!
//! - `RedisClient` / `RedisEphemeralStore`: shared store for production
//! - `MemoryEphemeralStore`: in-process store for development and tests

pub mod memory_store;
pub mod redis_client;
pub mod redis_store;


pub use memory_store::MemoryEphemeralStore;
pub use redis_client::RedisClient;
pub use redis_store::RedisEphemeralStore;

// Re-export commonly used types
pub use og_shared::CacheConfig;
