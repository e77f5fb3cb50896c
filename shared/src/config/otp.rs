//! OTP abuse-prevention policy
//!
//! Every duration here is a TTL handed to the ephemeral store; nothing in the
//! workspace keeps its own timers. The defaults are the values existing
//! clients depend on (60s cooldown, 3 issuances per sliding hour, 4 wrong
//! submissions before a 30 minute lock).

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Policy controlling issuance limits, code lifetime and lockouts
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OtpPolicy {
    /// Lifetime of a pending OTP in seconds
    #[serde(default = "default_code_ttl")]
    pub code_ttl_seconds: u64,

    /// Minimum gap between two issuances for the same identity
    #[serde(default = "default_cooldown")]
    pub cooldown_seconds: u64,

    /// Counter value at which the next issuance request escalates to a spam lock
    #[serde(default = "default_max_requests")]
    pub max_requests_per_window: u32,

    /// Sliding window for the request counter, refreshed on every increment
    #[serde(default = "default_request_window")]
    pub request_window_seconds: u64,

    /// Spam lock duration in seconds
    #[serde(default = "default_spam_lock")]
    pub spam_lock_seconds: u64,

    /// Attempt counter value at which the next mismatch locks the account
    #[serde(default = "default_max_failed_attempts")]
    pub max_failed_attempts: u32,

    /// Lifetime of the failed-attempt counter, refreshed on every increment
    #[serde(default = "default_attempts_ttl")]
    pub attempts_ttl_seconds: u64,

    /// Account lock duration in seconds
    #[serde(default = "default_account_lock")]
    pub account_lock_seconds: u64,

    /// Reject issuance when the dispatcher fails instead of reporting it on the receipt
    #[serde(default)]
    pub fail_on_delivery_error: bool,
}

impl Default for OtpPolicy {
    fn default() -> Self {
        Self {
            code_ttl_seconds: default_code_ttl(),
            cooldown_seconds: default_cooldown(),
            max_requests_per_window: default_max_requests(),
            request_window_seconds: default_request_window(),
            spam_lock_seconds: default_spam_lock(),
            max_failed_attempts: default_max_failed_attempts(),
            attempts_ttl_seconds: default_attempts_ttl(),
            account_lock_seconds: default_account_lock(),
            fail_on_delivery_error: false,
        }
    }
}

impl OtpPolicy {
    /// Build a policy from `OTP_*` environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            code_ttl_seconds: env_or("OTP_CODE_TTL_SECONDS", defaults.code_ttl_seconds),
            cooldown_seconds: env_or("OTP_COOLDOWN_SECONDS", defaults.cooldown_seconds),
            max_requests_per_window: env_or(
                "OTP_MAX_REQUESTS_PER_WINDOW",
                defaults.max_requests_per_window,
            ),
            request_window_seconds: env_or(
                "OTP_REQUEST_WINDOW_SECONDS",
                defaults.request_window_seconds,
            ),
            spam_lock_seconds: env_or("OTP_SPAM_LOCK_SECONDS", defaults.spam_lock_seconds),
            max_failed_attempts: env_or("OTP_MAX_FAILED_ATTEMPTS", defaults.max_failed_attempts),
            attempts_ttl_seconds: env_or("OTP_ATTEMPTS_TTL_SECONDS", defaults.attempts_ttl_seconds),
            account_lock_seconds: env_or("OTP_ACCOUNT_LOCK_SECONDS", defaults.account_lock_seconds),
            fail_on_delivery_error: env_or(
                "OTP_FAIL_ON_DELIVERY_ERROR",
                defaults.fail_on_delivery_error,
            ),
        }
    }

    /// Reject policies the store cannot express (zero TTLs expire immediately)
    pub fn validate(&self) -> Result<(), String> {
        let ttls = [
            ("code_ttl_seconds", self.code_ttl_seconds),
            ("cooldown_seconds", self.cooldown_seconds),
            ("request_window_seconds", self.request_window_seconds),
            ("spam_lock_seconds", self.spam_lock_seconds),
            ("attempts_ttl_seconds", self.attempts_ttl_seconds),
            ("account_lock_seconds", self.account_lock_seconds),
        ];

        if let Some((name, _)) = ttls.iter().find(|(_, value)| *value == 0) {
            return Err(format!("{} must be greater than zero", name));
        }

        if self.max_requests_per_window == 0 {
            return Err("max_requests_per_window must be greater than zero".to_string());
        }

        Ok(())
    }

    /// Account lock duration rounded to whole minutes, for user-facing messages
    pub fn account_lock_minutes(&self) -> u64 {
        self.account_lock_seconds.div_ceil(60)
    }

    /// Spam lock duration rounded to whole minutes, for user-facing messages
    pub fn spam_lock_minutes(&self) -> u64 {
        self.spam_lock_seconds.div_ceil(60)
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

fn default_code_ttl() -> u64 {
    300 // 5 minutes
}

fn default_cooldown() -> u64 {
    60
}

fn default_max_requests() -> u32 {
    2
}

fn default_request_window() -> u64 {
    3600 // 1 hour
}

fn default_spam_lock() -> u64 {
    3600 // 1 hour
}

fn default_max_failed_attempts() -> u32 {
    3
}

fn default_attempts_ttl() -> u64 {
    300
}

fn default_account_lock() -> u64 {
    1800 // 30 minutes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_matches_compatibility_values() {
        let policy = OtpPolicy::default();
        assert_eq!(policy.code_ttl_seconds, 300);
        assert_eq!(policy.cooldown_seconds, 60);
        assert_eq!(policy.max_requests_per_window, 2);
        assert_eq!(policy.request_window_seconds, 3600);
        assert_eq!(policy.spam_lock_seconds, 3600);
        assert_eq!(policy.max_failed_attempts, 3);
        assert_eq!(policy.attempts_ttl_seconds, 300);
        assert_eq!(policy.account_lock_seconds, 1800);
        assert!(!policy.fail_on_delivery_error);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_ttl() {
        let policy = OtpPolicy {
            cooldown_seconds: 0,
            ..Default::default()
        };
        let err = policy.validate().unwrap_err();
        assert!(err.contains("cooldown_seconds"));
    }

    #[test]
    fn test_validate_rejects_zero_request_budget() {
        let policy = OtpPolicy {
            max_requests_per_window: 0,
            ..Default::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_account_lock_minutes() {
        assert_eq!(OtpPolicy::default().account_lock_minutes(), 30);

        let policy = OtpPolicy {
            account_lock_seconds: 90,
            ..Default::default()
        };
        assert_eq!(policy.account_lock_minutes(), 2);
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let policy: OtpPolicy =
            serde_json::from_str(r#"{"cooldown_seconds": 30, "fail_on_delivery_error": true}"#)
                .unwrap();
        assert_eq!(policy.cooldown_seconds, 30);
        assert!(policy.fail_on_delivery_error);
        assert_eq!(policy.code_ttl_seconds, 300);
    }
}
