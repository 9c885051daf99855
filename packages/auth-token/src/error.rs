use thiserror::Error;

/// Reasons a token can fail to encode or decode.
///
/// Callers at the HTTP edge must not echo these to clients; they exist for
/// logging and tests.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token")]
    MalformedToken,
    #[error("unsupported signature algorithm: {0}")]
    UnsupportedAlgorithm(String),
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("failed to encode token: {0}")]
    Encoding(String),
}
