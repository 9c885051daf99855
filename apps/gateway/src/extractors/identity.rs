use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use auth_token::Claims;
use serde::{Deserialize, Serialize};

use crate::auth::AuthFailure;
use crate::error::AppError;

/// Identity established by the `AuthGate` middleware for the current request.
///
/// Lives only in that request's extensions, so concurrent requests never
/// observe each other's identity.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject_id: String,
    pub email: String,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            subject_id: claims.subject_id,
            email: claims.email,
        }
    }
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Identity>()
                .cloned()
                .ok_or_else(|| AppError::unauthorized(AuthFailure::MissingCredential)),
        )
    }
}
