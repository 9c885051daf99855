use auth_token::SecurityConfig;

use crate::config::GatewayConfig;
use crate::error::AppError;
use crate::proxy::ForwardingProxy;

/// Immutable per-process state, built once in `main` and shared by
/// reference through `web::Data`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Token verification settings
    pub security: SecurityConfig,
    /// Pooled client and upstream target
    pub proxy: ForwardingProxy,
}

impl AppState {
    pub fn new(security: SecurityConfig, proxy: ForwardingProxy) -> Self {
        Self { security, proxy }
    }

    pub fn from_config(config: &GatewayConfig) -> Result<Self, AppError> {
        let security = SecurityConfig::new(config.jwt_secret.as_bytes());
        let proxy = ForwardingProxy::new(config.upstream.clone())?;
        Ok(Self::new(security, proxy))
    }
}
