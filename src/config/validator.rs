//! Settings validation: values that parse but cannot work at runtime.

use crate::config::Settings;
use crate::error::ConfigError;

/// Shortest accepted `SECRET_KEY`, in bytes.
pub const MIN_SECRET_LEN: usize = 16;

pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if settings.secret_key.len() < MIN_SECRET_LEN {
        return Err(ConfigError::Invalid {
            key: "SECRET_KEY",
            reason: format!("must be at least {} bytes", MIN_SECRET_LEN),
        });
    }
    if !(4..=31).contains(&settings.bcrypt_cost) {
        return Err(ConfigError::Invalid {
            key: "BCRYPT_COST",
            reason: format!("{} is outside 4..=31", settings.bcrypt_cost),
        });
    }
    if settings.session_ttl.is_zero() {
        return Err(ConfigError::Invalid {
            key: "SESSION_TTL_SECS",
            reason: "must be positive".into(),
        });
    }
    if settings.remember_ttl.is_zero() {
        return Err(ConfigError::Invalid {
            key: "REMEMBER_TTL_SECS",
            reason: "must be positive".into(),
        });
    }
    if settings.max_connections == 0 {
        return Err(ConfigError::Invalid {
            key: "DATABASE_MAX_CONNECTIONS",
            reason: "must be positive".into(),
        });
    }
    if !settings.database_url.starts_with("sqlite:") {
        return Err(ConfigError::Invalid {
            key: "DATABASE_URL",
            reason: "only sqlite: URLs are supported".into(),
        });
    }
    Ok(())
}
