//! Configuration module with business-specific sub-modules
//!
//! - `cache` - Redis connection and key prefix for the ephemeral store
//! - `environment` - Environment detection and logging configuration
//! - `otp` - Issuance limits, code lifetime and lockout policy

pub mod cache;
pub mod environment;
pub mod otp;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use cache::CacheConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::OtpPolicy;

/// Notification dispatcher selection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationConfig {
    /// Dispatcher implementation ("log")
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Print delivered codes in plain text (development only)
    #[serde(default)]
    pub reveal_codes: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            reveal_codes: false,
        }
    }
}

fn default_provider() -> String {
    String::from("log")
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Ephemeral store configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// OTP policy
    #[serde(default)]
    pub otp: OtpPolicy,

    /// Notification dispatcher configuration
    #[serde(default)]
    pub notification: NotificationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Configuration suited to the given environment, before any overrides
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            cache: CacheConfig::default(),
            otp: OtpPolicy::default(),
            notification: NotificationConfig {
                reveal_codes: environment.is_development(),
                ..Default::default()
            },
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        Self::from_env_for(Environment::from_env())
    }

    /// Environment defaults with `REDIS_*` and `OTP_*` variables applied
    pub fn from_env_for(environment: Environment) -> Self {
        Self {
            cache: CacheConfig::from_env(),
            otp: OtpPolicy::from_env(),
            ..Self::for_environment(environment)
        }
    }
}
