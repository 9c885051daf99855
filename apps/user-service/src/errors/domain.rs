//! Domain-level error type shared by the service and store layers.
//!
//! HTTP- and DB-agnostic. Handlers return `crate::error::AppError`, which
//! converts from `DomainError`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    Hashing,
    Token,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    User,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    UniqueEmail,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Input rejected before touching the store
    #[error("validation error: {0}")]
    Validation(String),
    /// Unknown email or wrong password; the two are indistinguishable
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("conflict {0:?}: {1}")]
    Conflict(ConflictKind, String),
    #[error("not found {0:?}: {1}")]
    NotFound(NotFoundKind, String),
    #[error("infra {0:?}: {1}")]
    Infra(InfraErrorKind, String),
}

impl DomainError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }

    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }

    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }

    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    pub fn user_not_found() -> Self {
        Self::not_found(NotFoundKind::User, "User not found")
    }
}
