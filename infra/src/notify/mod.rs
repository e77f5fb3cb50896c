//! Notification dispatchers
//!
//! The only built-in provider is `log`, which writes deliveries to the
//! tracing output. Real providers plug in by implementing
//! `og_core::NotificationDispatcher`.

use std::sync::Arc;

use og_core::NotificationDispatcher;
use og_shared::NotificationConfig;

pub mod log_dispatcher;

pub use log_dispatcher::LogDispatcher;


/// Create a notification dispatcher based on configuration
///
/// Unknown providers fall back to the log dispatcher with a warning.
pub fn create_dispatcher(config: &NotificationConfig) -> Arc<dyn NotificationDispatcher> {
    match config.provider.as_str() {
        "log" => Arc::new(LogDispatcher::new(config.reveal_codes)),
        other => {
            tracing::warn!(
                "Unknown notification provider '{}', using log implementation",
                other
            );
            Arc::new(LogDispatcher::new(config.reveal_codes))
        }
    }
}
