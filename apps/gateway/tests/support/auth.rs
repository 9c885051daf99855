//! Token helpers for gateway tests.

use std::time::{Duration, SystemTime};

use auth_token::SecurityConfig;

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes_only";

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET.as_bytes())
}

/// Bearer token valid for the default TTL.
pub fn mint_test_token(subject_id: &str, email: &str, sec: &SecurityConfig) -> String {
    auth_token::encode_now(subject_id, email, sec).expect("should mint token successfully")
}

/// Full Authorization header value including the "Bearer " prefix.
pub fn bearer_header(subject_id: &str, email: &str, sec: &SecurityConfig) -> String {
    format!("Bearer {}", mint_test_token(subject_id, email, sec))
}

/// Token minted two hours ago with a one hour TTL.
pub fn mint_expired_token(subject_id: &str, email: &str, sec: &SecurityConfig) -> String {
    let minted_at = SystemTime::now() - Duration::from_secs(7200);
    auth_token::encode(
        subject_id,
        email,
        &sec.jwt_secret,
        Duration::from_secs(3600),
        minted_at,
    )
    .expect("should mint expired token successfully")
}

/// Valid shape and expiry, signed with some other key.
pub fn mint_wrong_secret_token(subject_id: &str, email: &str) -> String {
    let other = SecurityConfig::new(b"some-other-secret".to_vec());
    mint_test_token(subject_id, email, &other)
}
