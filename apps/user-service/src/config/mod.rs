//! User service configuration, read once from the environment at startup.

use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_PORT: u16 = 8081;
pub const DEFAULT_TOKEN_TTL_HOURS: u64 = 24;
pub const DEFAULT_BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;
/// Costs the bcrypt crate accepts.
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
}

impl DbConfig {
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.name
        )
    }
}

impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"[redacted]")
            .field("name", &self.name)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub db: DbConfig,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub bcrypt_cost: u32,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let get_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let jwt_secret = get("JWT_SECRET").ok_or_else(|| AppError::config("JWT_SECRET must be set"))?;

        let ttl_hours = parse_or("TOKEN_TTL_HOURS", get("TOKEN_TTL_HOURS"), DEFAULT_TOKEN_TTL_HOURS)?;
        if ttl_hours == 0 {
            return Err(AppError::config("TOKEN_TTL_HOURS must be greater than zero"));
        }
        let token_ttl_secs = ttl_hours
            .checked_mul(3600)
            .ok_or_else(|| AppError::config(format!("TOKEN_TTL_HOURS is too large, got {ttl_hours}")))?;

        let bcrypt_cost = parse_or("BCRYPT_COST", get("BCRYPT_COST"), DEFAULT_BCRYPT_COST)?;
        if !BCRYPT_COST_RANGE.contains(&bcrypt_cost) {
            return Err(AppError::config(format!(
                "BCRYPT_COST must be between {} and {}",
                BCRYPT_COST_RANGE.start(),
                BCRYPT_COST_RANGE.end()
            )));
        }

        Ok(Self {
            host: get_or("HOST", "0.0.0.0"),
            port: parse_or("PORT", get("PORT"), DEFAULT_PORT)?,
            db: DbConfig {
                host: get_or("DB_HOST", "localhost"),
                port: parse_or("DB_PORT", get("DB_PORT"), 5432)?,
                user: get_or("DB_USER", "admin"),
                password: get_or("DB_PASSWORD", "admin123"),
                name: get_or("DB_NAME", "userdb"),
            },
            jwt_secret,
            token_ttl: Duration::from_secs(token_ttl_secs),
            bcrypt_cost,
        })
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T, AppError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| AppError::config(format!("{key} must be a valid number, got '{value}'"))),
    }
}
