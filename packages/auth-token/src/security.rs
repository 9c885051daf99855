use std::time::Duration;

/// Tokens live for 24 hours unless configured otherwise.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Configuration for token signing and verification
#[derive(Clone)]
pub struct SecurityConfig {
    /// Shared HMAC secret for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// Lifetime of newly minted tokens
    pub token_ttl: Duration,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given secret and the default TTL
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }

    pub fn with_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }
}

// Never print the secret.
impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}
