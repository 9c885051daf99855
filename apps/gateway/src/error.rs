use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::auth::AuthFailure;
use web_support::trace_ctx;

/// JSON error body returned to gateway callers.
#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
    pub trace_id: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    /// The reason is kept for logs and tests; callers only ever see the
    /// generic 401 body.
    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: AuthFailure },
    #[error("Bad gateway: {detail}")]
    BadGateway { detail: String },
    #[error("Failed to read upstream response: {detail}")]
    UpstreamRead { detail: String },
    #[error("Route not found")]
    RouteNotFound,
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// Stable machine-readable code for the response body
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized { .. } => "UNAUTHORIZED",
            AppError::BadGateway { .. } => "BAD_GATEWAY",
            AppError::UpstreamRead { .. } => "UPSTREAM_READ_FAILURE",
            AppError::RouteNotFound => "ROUTE_NOT_FOUND",
            AppError::Internal { .. } => "INTERNAL",
            AppError::Config { .. } => "CONFIG_ERROR",
        }
    }

    /// Caller-facing message. Never includes upstream or credential detail.
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::Unauthorized { .. } => "Unauthorized",
            AppError::BadGateway { .. } => "Service unavailable",
            AppError::UpstreamRead { .. } => "Failed to read response",
            AppError::RouteNotFound => "Not found",
            AppError::Internal { .. } => "Internal server error",
            AppError::Config { .. } => "Internal server error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            AppError::UpstreamRead { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::RouteNotFound => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn unauthorized(reason: AuthFailure) -> Self {
        Self::Unauthorized { reason }
    }

    pub fn bad_gateway(detail: impl Into<String>) -> Self {
        Self::BadGateway {
            detail: detail.into(),
        }
    }

    pub fn upstream_read(detail: impl Into<String>) -> Self {
        Self::UpstreamRead {
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

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let trace_id = trace_ctx::trace_id();

        let body = ErrorBody {
            error: self.public_message().to_string(),
            code: self.code().to_string(),
            trace_id: trace_id.clone(),
        };

        HttpResponse::build(self.status())
            .insert_header(("x-trace-id", trace_id))
            .json(body)
    }
}
