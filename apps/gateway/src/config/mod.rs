//! Gateway configuration, read once from the environment at startup.

use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_USER_SERVICE_URL: &str = "http://localhost:8081";
pub const DEFAULT_STRIP_PREFIX: &str = "/api";
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Where and how requests are forwarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    /// Downstream base URL, without a trailing slash
    pub base_url: String,
    /// Removed from the start of inbound paths when present
    pub strip_prefix: String,
    /// Hard upper bound on each forwarded call
    pub timeout: Duration,
}

impl UpstreamConfig {
    pub fn new(base_url: impl Into<String>, strip_prefix: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            strip_prefix: strip_prefix.into(),
            timeout: DEFAULT_UPSTREAM_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub upstream: UpstreamConfig,
    pub max_body_bytes: usize,
    pub cors_allowed_origins: Vec<String>,
}

impl GatewayConfig {
    /// Environment variables must be set by the runtime environment
    /// (docker-compose env_file, or sourced manually for local dev).
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host = get("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or("PORT", get("PORT"), DEFAULT_PORT)?;

        let jwt_secret = get("JWT_SECRET")
            .ok_or_else(|| AppError::config("JWT_SECRET must be set"))?;

        let base_url = get("USER_SERVICE_URL").unwrap_or_else(|| DEFAULT_USER_SERVICE_URL.to_string());
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(AppError::config(format!(
                "USER_SERVICE_URL must be an http(s) URL, got '{base_url}'"
            )));
        }

        // An explicitly empty prefix disables stripping, so read it raw.
        let strip_prefix =
            lookup("GATEWAY_STRIP_PREFIX").unwrap_or_else(|| DEFAULT_STRIP_PREFIX.to_string());

        let timeout_ms = parse_or(
            "UPSTREAM_TIMEOUT_MS",
            get("UPSTREAM_TIMEOUT_MS"),
            DEFAULT_UPSTREAM_TIMEOUT.as_millis() as u64,
        )?;
        if timeout_ms == 0 {
            return Err(AppError::config("UPSTREAM_TIMEOUT_MS must be greater than zero"));
        }

        let max_body_bytes = parse_or(
            "GATEWAY_MAX_BODY_BYTES",
            get("GATEWAY_MAX_BODY_BYTES"),
            DEFAULT_MAX_BODY_BYTES,
        )?;

        let cors_allowed_origins = parse_origins(get("CORS_ALLOWED_ORIGINS").as_deref());

        Ok(Self {
            host,
            port,
            jwt_secret,
            upstream: UpstreamConfig::new(base_url, strip_prefix)
                .with_timeout(Duration::from_millis(timeout_ms)),
            max_body_bytes,
            cors_allowed_origins,
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

/// Comma-separated origins; blanks, "null" and non-http entries are dropped.
/// Falls back to the local frontend when nothing valid is configured.
fn parse_origins(raw: Option<&str>) -> Vec<String> {
    let origins: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(|s| s.to_string())
        .collect();

    if origins.is_empty() {
        vec!["http://localhost:3000".to_string()]
    } else {
        origins
    }
}
