//! Bearer credential validation.
//!
//! `authenticate` only establishes identity. It grants nothing by itself;
//! the router decides which routes require it.

use std::time::SystemTime;

use actix_web::http::header::{self, HeaderMap, HeaderValue};
use auth_token::{SecurityConfig, TokenError};
use thiserror::Error;

use crate::extractors::identity::Identity;

/// Why a request failed authentication. Internal only: every variant is
/// rendered as the same 401 body.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    #[error("missing Authorization header")]
    MissingCredential,
    #[error("malformed Authorization header")]
    MalformedCredential,
    #[error("invalid token: {0}")]
    InvalidToken(#[from] TokenError),
}

/// Validate the request's bearer credential against the system clock.
pub fn authenticate(headers: &HeaderMap, security: &SecurityConfig) -> Result<Identity, AuthFailure> {
    authenticate_at(headers, security, SystemTime::now())
}

pub fn authenticate_at(
    headers: &HeaderMap,
    security: &SecurityConfig,
    now: SystemTime,
) -> Result<Identity, AuthFailure> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthFailure::MissingCredential)?;

    let token = extract_bearer(value)?;
    let claims = auth_token::decode(token, &security.jwt_secret, now)?;

    Ok(Identity::from(claims))
}

/// Accepts exactly `<scheme> <token>` where scheme is `Bearer` in any case.
fn extract_bearer(value: &HeaderValue) -> Result<&str, AuthFailure> {
    let raw = value
        .to_str()
        .map_err(|_| AuthFailure::MalformedCredential)?;

    let mut parts = raw.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(AuthFailure::MalformedCredential),
    }
}
