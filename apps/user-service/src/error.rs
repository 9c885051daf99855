use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use web_support::trace_ctx;

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

/// JSON error body, the same shape the gateway uses.
#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
    pub trace_id: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: &'static str, detail: String },
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Not found: {detail}")]
    NotFound { code: &'static str, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: &'static str, detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Database unavailable: {detail}")]
    DbUnavailable { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::NotFound { code, .. } => *code,
            AppError::Conflict { code, .. } => *code,
            AppError::Db { .. } => "DB_ERROR",
            AppError::DbUnavailable { .. } => "DB_UNAVAILABLE",
            AppError::Internal { .. } => "INTERNAL",
            AppError::Config { .. } => "CONFIG_ERROR",
        }
    }

    /// Caller-facing message. Infrastructure detail stays in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation { detail, .. } => detail.clone(),
            AppError::InvalidCredentials => "Invalid credentials".to_string(),
            AppError::NotFound { detail, .. } => detail.clone(),
            AppError::Conflict { detail, .. } => detail.clone(),
            AppError::Db { .. } | AppError::Internal { .. } | AppError::Config { .. } => {
                "Internal server error".to_string()
            }
            AppError::DbUnavailable { .. } => "Service unavailable".to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Db { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DbUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn invalid(code: &'static str, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: &'static str, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: &'static str, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(detail) => AppError::invalid("VALIDATION_ERROR", detail),
            DomainError::InvalidCredentials => AppError::InvalidCredentials,
            DomainError::Conflict(ConflictKind::UniqueEmail, detail) => {
                AppError::conflict("EMAIL_TAKEN", detail)
            }
            DomainError::Conflict(_, detail) => AppError::conflict("CONFLICT", detail),
            DomainError::NotFound(NotFoundKind::User, detail) => {
                AppError::not_found("USER_NOT_FOUND", detail)
            }
            DomainError::NotFound(_, detail) => AppError::not_found("NOT_FOUND", detail),
            DomainError::Infra(InfraErrorKind::DbUnavailable | InfraErrorKind::Timeout, detail) => {
                AppError::DbUnavailable { detail }
            }
            DomainError::Infra(InfraErrorKind::Hashing | InfraErrorKind::Token, detail) => {
                AppError::internal(detail)
            }
            DomainError::Infra(_, detail) => AppError::Db { detail },
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::Db {
            detail: e.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let trace_id = trace_ctx::trace_id();

        if status.is_server_error() {
            error!(trace_id = %trace_id, error = %self, "request failed");
        }

        HttpResponse::build(status)
            .insert_header(("x-trace-id", trace_id.clone()))
            .json(ErrorBody {
                error: self.public_message(),
                code: self.code().to_string(),
                trace_id,
            })
    }
}
