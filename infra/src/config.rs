//! Layered configuration loading
//!
//! Sources, lowest precedence first:
//! 1. `AppConfig::from_env_for` defaults (environment presets plus the
//!    `REDIS_*` and `OTP_*` variables)
//! 2. `config.{environment}.toml` in the config directory (optional)
//! 3. `OTPGUARD__*` environment variables, `__` separating nested keys
//!    (e.g. `OTPGUARD__OTP__COOLDOWN_SECONDS=30`)

use std::path::Path;

use ::config::{Config, Environment as EnvSource, File};
use og_shared::{AppConfig, Environment};
use tracing::info;

use crate::InfrastructureError;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "OTPGUARD";

/// Load configuration for the environment named by `ENVIRONMENT`
///
/// Reads `.env` first if present, then looks for the config file in
/// `CONFIG_DIR` (default: the working directory).
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env();
    let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| String::from("."));

    load_config_from(environment, Path::new(&config_dir))
}

/// Load configuration for `environment` from `config_dir` plus environment overrides
pub fn load_config_from(
    environment: Environment,
    config_dir: &Path,
) -> Result<AppConfig, InfrastructureError> {
    let defaults = AppConfig::from_env_for(environment);
    let file = config_dir.join(environment.config_file());

    let config: AppConfig = Config::builder()
        .add_source(Config::try_from(&defaults)?)
        .add_source(File::from(file.as_path()).required(false))
        .add_source(
            EnvSource::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    config
        .otp
        .validate()
        .map_err(|e| InfrastructureError::Config(format!("Invalid OTP policy: {}", e)))?;

    info!(
        environment = %config.environment,
        notification_provider = %config.notification.provider,
        key_prefix = config.cache.key_prefix.as_deref().unwrap_or(""),
        "Configuration loaded"
    );

    Ok(config)
}
