//! Runtime settings loaded from environment variables.

use crate::error::ConfigError;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://blog.db";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 60 * 60;
const DEFAULT_REMEMBER_TTL_SECS: u64 = 365 * 24 * 60 * 60;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,
    /// HMAC key for session tokens.
    pub secret_key: String,
    /// Lifetime of a login without "remember me".
    pub session_ttl: Duration,
    /// Lifetime of the persistent cookie set by "remember me".
    pub remember_ttl: Duration,
    pub bcrypt_cost: u32,
    pub max_connections: u32,
    /// Adds the `Secure` attribute to cookies (HTTPS deployments).
    pub secure_cookies: bool,
    pub body_limit_bytes: usize,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, which returns the raw value of a variable if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let secret_key = get("SECRET_KEY").ok_or(ConfigError::Missing("SECRET_KEY"))?;
        let settings = Settings {
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            secret_key,
            session_ttl: Duration::from_secs(parse_or(
                "SESSION_TTL_SECS",
                get("SESSION_TTL_SECS"),
                DEFAULT_SESSION_TTL_SECS,
            )?),
            remember_ttl: Duration::from_secs(parse_or(
                "REMEMBER_TTL_SECS",
                get("REMEMBER_TTL_SECS"),
                DEFAULT_REMEMBER_TTL_SECS,
            )?),
            bcrypt_cost: parse_or("BCRYPT_COST", get("BCRYPT_COST"), bcrypt::DEFAULT_COST)?,
            max_connections: parse_or(
                "DATABASE_MAX_CONNECTIONS",
                get("DATABASE_MAX_CONNECTIONS"),
                DEFAULT_MAX_CONNECTIONS,
            )?,
            secure_cookies: parse_bool("SECURE_COOKIES", get("SECURE_COOKIES"))?,
            body_limit_bytes: parse_or(
                "BODY_LIMIT_BYTES",
                get("BODY_LIMIT_BYTES"),
                DEFAULT_BODY_LIMIT_BYTES,
            )?,
        };
        super::validate(&settings)?;
        Ok(settings)
    }

    /// Settings for an in-memory database, used by tests and local experiments.
    pub fn in_memory(secret_key: &str) -> Self {
        Settings {
            database_url: "sqlite::memory:".into(),
            bind_addr: DEFAULT_BIND_ADDR.into(),
            secret_key: secret_key.into(),
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
            remember_ttl: Duration::from_secs(DEFAULT_REMEMBER_TTL_SECS),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            max_connections: 1,
            secure_cookies: false,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(s) => s.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: format!("'{}': {}", s, e),
        }),
    }
}

fn parse_bool(key: &'static str, raw: Option<String>) -> Result<bool, ConfigError> {
    match raw.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None => Ok(false),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => Err(ConfigError::Invalid {
            key,
            reason: format!("'{}' is not a boolean", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let settings = Settings::from_lookup(lookup(&[("SECRET_KEY", "0123456789abcdef0123")])).unwrap();
        assert_eq!(settings.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(settings.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(settings.session_ttl, Duration::from_secs(DEFAULT_SESSION_TTL_SECS));
        assert_eq!(settings.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert!(!settings.secure_cookies);
    }

    #[test]
    fn missing_secret_is_rejected() {
        let err = Settings::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("SECRET_KEY")));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let settings = Settings::from_lookup(lookup(&[
            ("SECRET_KEY", "0123456789abcdef0123"),
            ("DATABASE_URL", "   "),
        ]))
        .unwrap();
        assert_eq!(settings.database_url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn overrides_are_parsed() {
        let settings = Settings::from_lookup(lookup(&[
            ("SECRET_KEY", "0123456789abcdef0123"),
            ("DATABASE_URL", "sqlite://shop.db"),
            ("SESSION_TTL_SECS", "60"),
            ("BCRYPT_COST", "4"),
            ("SECURE_COOKIES", "TRUE"),
        ]))
        .unwrap();
        assert_eq!(settings.database_url, "sqlite://shop.db");
        assert_eq!(settings.session_ttl, Duration::from_secs(60));
        assert_eq!(settings.bcrypt_cost, 4);
        assert!(settings.secure_cookies);
    }

    #[test]
    fn unparsable_number_names_the_key() {
        let err = Settings::from_lookup(lookup(&[
            ("SECRET_KEY", "0123456789abcdef0123"),
            ("DATABASE_MAX_CONNECTIONS", "many"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DATABASE_MAX_CONNECTIONS", .. }));
    }

    #[test]
    fn bad_boolean_is_rejected() {
        let err = Settings::from_lookup(lookup(&[
            ("SECRET_KEY", "0123456789abcdef0123"),
            ("SECURE_COOKIES", "maybe"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "SECURE_COOKIES", .. }));
    }
}
