//! Signed, time-bounded identity assertions shared by the gateway and the
//! user service.
//!
//! Tokens are HS256 JWTs carrying `user_id`, `email`, `iat` and `exp`. The
//! gateway only verifies them; the user service mints them on login.

pub mod claims;
pub mod codec;
pub mod error;
pub mod security;

pub use claims::Claims;
pub use codec::{decode, decode_now, encode, encode_now, TOKEN_ALGORITHM};
pub use error::TokenError;
pub use security::{SecurityConfig, DEFAULT_TOKEN_TTL};
