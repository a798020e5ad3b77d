//! Configuration for the session token manager.
//!
//! Signing keys come from the environment (`TOKENGATE_ACCESS_KEY`,
//! `TOKENGATE_REFRESH_KEY`); lifetimes and lockout policy have defaults
//! that match the deployed service and can be overridden in code.
//!
//! A `.env` file is honored when present (via dotenvy), so local
//! development does not need exported variables.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Access token lifetime in minutes
pub const DEFAULT_ACCESS_TTL_MINUTES: i64 = 15;

/// Refresh token lifetime in days
pub const DEFAULT_REFRESH_TTL_DAYS: i64 = 7;

/// Failed logins before the account locks
pub const DEFAULT_MAX_FAILED_LOGINS: u32 = 5;

/// Lockout duration in minutes once the failure threshold is reached
pub const DEFAULT_LOCKOUT_MINUTES: i64 = 15;

const ACCESS_KEY_VAR: &str = "TOKENGATE_ACCESS_KEY";
const REFRESH_KEY_VAR: &str = "TOKENGATE_REFRESH_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),

    /// The two signing keys must differ; an access token must never
    /// verify as a refresh token or vice versa.
    #[error("access and refresh signing keys must be distinct")]
    SharedKey,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub access_signing_key: String,
    pub refresh_signing_key: String,
    pub access_ttl_minutes: i64,
    pub refresh_ttl_days: i64,
    pub max_failed_logins: u32,
    pub lockout_minutes: i64,
}

impl AuthConfig {
    /// Build a config with the default lifetimes and lockout policy.
    pub fn new(
        access_signing_key: impl Into<String>,
        refresh_signing_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let access_signing_key = access_signing_key.into();
        let refresh_signing_key = refresh_signing_key.into();
        if access_signing_key == refresh_signing_key {
            return Err(ConfigError::SharedKey);
        }
        Ok(Self {
            access_signing_key,
            refresh_signing_key,
            access_ttl_minutes: DEFAULT_ACCESS_TTL_MINUTES,
            refresh_ttl_days: DEFAULT_REFRESH_TTL_DAYS,
            max_failed_logins: DEFAULT_MAX_FAILED_LOGINS,
            lockout_minutes: DEFAULT_LOCKOUT_MINUTES,
        })
    }

    /// Load signing keys from the environment, reading a `.env` file first
    /// if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Missing .env is fine; real env vars still apply.
        let _ = dotenvy::dotenv();

        let access = std::env::var(ACCESS_KEY_VAR)
            .map_err(|_| ConfigError::MissingVar(ACCESS_KEY_VAR))?;
        let refresh = std::env::var(REFRESH_KEY_VAR)
            .map_err(|_| ConfigError::MissingVar(REFRESH_KEY_VAR))?;
        Self::new(access, refresh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::new("access-secret", "refresh-secret").unwrap();
        assert_eq!(config.access_ttl_minutes, 15);
        assert_eq!(config.refresh_ttl_days, 7);
        assert_eq!(config.max_failed_logins, 5);
        assert_eq!(config.lockout_minutes, 15);
    }

    #[test]
    fn test_rejects_shared_key() {
        assert!(matches!(
            AuthConfig::new("same", "same"),
            Err(ConfigError::SharedKey)
        ));
    }
}
