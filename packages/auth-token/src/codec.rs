use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::claims::Claims;
use crate::error::TokenError;
use crate::security::SecurityConfig;

/// The only signature scheme accepted for access tokens.
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

fn unix_seconds(at: SystemTime) -> Option<i64> {
    at.duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|elapsed| i64::try_from(elapsed.as_secs()).ok())
}

/// Mint an HS256 token with `iat = now` and `exp = now + ttl`.
pub fn encode(
    subject_id: &str,
    email: &str,
    secret: &[u8],
    ttl: Duration,
    now: SystemTime,
) -> Result<String, TokenError> {
    if ttl.as_secs() == 0 {
        return Err(TokenError::Encoding(
            "token lifetime must be at least one second".to_string(),
        ));
    }

    let issued_at = unix_seconds(now)
        .ok_or_else(|| TokenError::Encoding("clock is outside the unix timestamp range".to_string()))?;

    let expires_at = i64::try_from(ttl.as_secs())
        .ok()
        .and_then(|ttl_secs| issued_at.checked_add(ttl_secs))
        .ok_or_else(|| TokenError::Encoding("token lifetime is out of range".to_string()))?;

    let claims = Claims {
        subject_id: subject_id.to_string(),
        email: email.to_string(),
        issued_at,
        expires_at,
    };

    jsonwebtoken::encode(
        &Header::new(TOKEN_ALGORITHM),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| TokenError::Encoding(e.to_string()))
}

/// Mint a token using the configured TTL and the system clock.
pub fn encode_now(
    subject_id: &str,
    email: &str,
    security: &SecurityConfig,
) -> Result<String, TokenError> {
    encode(
        subject_id,
        email,
        &security.jwt_secret,
        security.token_ttl,
        SystemTime::now(),
    )
}

/// Verify a token and return its claims.
///
/// Checks run in this order: structure, pinned algorithm, expiry, then
/// signature. An expired assertion is therefore reported as `Expired`
/// whether or not its signature would verify.
pub fn decode(token: &str, secret: &[u8], now: SystemTime) -> Result<Claims, TokenError> {
    let (header_segment, payload_segment) = split_segments(token)?;

    let header: RawHeader = decode_segment(header_segment)?;
    match header.alg.parse::<Algorithm>() {
        Ok(alg) if alg == TOKEN_ALGORITHM => {}
        _ => return Err(TokenError::UnsupportedAlgorithm(header.alg)),
    }

    let claims: Claims = decode_segment(payload_segment)?;
    if claims.expires_at <= claims.issued_at {
        return Err(TokenError::MalformedToken);
    }
    if claims.is_expired_at(unix_seconds(now).unwrap_or(0)) {
        return Err(TokenError::Expired);
    }

    // Expiry is already enforced above against the caller's clock.
    let mut validation = Validation::new(TOKEN_ALGORITHM);
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims::<&str>(&[]);

    jsonwebtoken::decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                TokenError::UnsupportedAlgorithm(e.to_string())
            }
            _ => TokenError::MalformedToken,
        })
}

/// Verify a token against the system clock.
pub fn decode_now(token: &str, security: &SecurityConfig) -> Result<Claims, TokenError> {
    decode(token, &security.jwt_secret, SystemTime::now())
}

fn split_segments(token: &str) -> Result<(&str, &str), TokenError> {
    let mut parts = token.split('.');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(header), Some(payload), Some(_signature), None)
            if !header.is_empty() && !payload.is_empty() =>
        {
            Ok((header, payload))
        }
        _ => Err(TokenError::MalformedToken),
    }
}

fn decode_segment<T: DeserializeOwned>(segment: &str) -> Result<T, TokenError> {
    let raw = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::MalformedToken)?;
    serde_json::from_slice(&raw).map_err(|_| TokenError::MalformedToken)
}
