use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind};

/// Error body returned to clients. A single human-readable message; internal
/// detail never crosses this boundary for 5xx responses.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { detail: String },
    #[error("Bad request: {detail}")]
    BadRequest { detail: String },
    #[error("UnauthorizedMissingBearer")]
    UnauthorizedMissingBearer,
    #[error("UnauthorizedInvalidJwt")]
    UnauthorizedInvalidJwt,
    #[error("UnauthorizedExpiredJwt")]
    UnauthorizedExpiredJwt,
    #[error("InvalidCredentials")]
    InvalidCredentials,
    #[error("Forbidden: {detail}")]
    Forbidden { detail: String },
    #[error("Not found: {detail}")]
    NotFound { detail: String },
    #[error("Conflict: {detail}")]
    Conflict { detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Database unavailable")]
    DbUnavailable,
    #[error("Operation timed out: {detail}")]
    Timeout { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// Stable machine-readable code, used for logging.
    fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::BadRequest { .. } => "BAD_REQUEST",
            AppError::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            AppError::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            AppError::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::Forbidden { .. } => "FORBIDDEN",
            AppError::NotFound { .. } => "NOT_FOUND",
            AppError::Conflict { .. } => "CONFLICT",
            AppError::Db { .. } => "DB_ERROR",
            AppError::DbUnavailable => "DB_UNAVAILABLE",
            AppError::Timeout { .. } => "TIMEOUT",
            AppError::Internal { .. } => "INTERNAL",
            AppError::Config { .. } => "CONFIG_ERROR",
        }
    }

    /// Client-facing message. 5xx variants collapse to a generic message.
    fn message(&self) -> String {
        match self {
            AppError::Validation { detail } => detail.clone(),
            AppError::BadRequest { detail } => detail.clone(),
            AppError::UnauthorizedMissingBearer => "authorization token missing".to_string(),
            AppError::UnauthorizedInvalidJwt => "invalid authorization token".to_string(),
            AppError::UnauthorizedExpiredJwt => "authorization token expired".to_string(),
            AppError::InvalidCredentials => "invalid username or password".to_string(),
            AppError::Forbidden { detail } => detail.clone(),
            AppError::NotFound { detail } => detail.clone(),
            AppError::Conflict { detail } => detail.clone(),
            AppError::Db { .. }
            | AppError::DbUnavailable
            | AppError::Timeout { .. }
            | AppError::Internal { .. }
            | AppError::Config { .. } => "the server encountered a problem".to_string(),
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::UnauthorizedMissingBearer
            | AppError::UnauthorizedInvalidJwt
            | AppError::UnauthorizedExpiredJwt
            | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Db { .. }
            | AppError::DbUnavailable
            | AppError::Timeout { .. }
            | AppError::Internal { .. }
            | AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation {
            detail: detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::BadRequest {
            detail: detail.into(),
        }
    }

    pub fn unauthorized_missing_bearer() -> Self {
        Self::UnauthorizedMissingBearer
    }

    pub fn unauthorized_invalid_jwt() -> Self {
        Self::UnauthorizedInvalidJwt
    }

    pub fn unauthorized_expired_jwt() -> Self {
        Self::UnauthorizedExpiredJwt
    }

    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials
    }

    pub fn forbidden(detail: impl Into<String>) -> Self {
        Self::Forbidden {
            detail: detail.into(),
        }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound {
            detail: detail.into(),
        }
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db {
            detail: detail.into(),
        }
    }

    pub fn db_unavailable() -> Self {
        Self::DbUnavailable
    }

    pub fn timeout(detail: impl Into<String>) -> Self {
        Self::Timeout {
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
            DomainError::Validation(detail) => AppError::Validation { detail },
            DomainError::Conflict(kind, detail) => {
                let detail = match kind {
                    ConflictKind::UniqueUsername => "this username is already taken".to_string(),
                    ConflictKind::UniqueEmail => "this email is already taken".to_string(),
                    _ => detail,
                };
                AppError::Conflict { detail }
            }
            DomainError::NotFound(_, detail) => AppError::NotFound { detail },
            DomainError::Infra(InfraErrorKind::Timeout, detail) => AppError::Timeout { detail },
            DomainError::Infra(InfraErrorKind::DbUnavailable, _) => AppError::DbUnavailable,
            DomainError::Infra(_, detail) => AppError::Db { detail },
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::db(format!("db error: {e}"))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.code(), error = %self, "request rejected");
        }

        HttpResponse::build(status).json(ErrorResponse {
            message: self.message(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::domain::NotFoundKind;

    #[test]
    fn conflict_kinds_map_to_canonical_messages() {
        let username: AppError =
            DomainError::conflict(ConflictKind::UniqueUsername, "duplicate").into();
        assert_eq!(username.status(), StatusCode::CONFLICT);
        assert_eq!(username.message(), "this username is already taken");

        let email: AppError = DomainError::conflict(ConflictKind::UniqueEmail, "duplicate").into();
        assert_eq!(email.message(), "this email is already taken");
    }

    #[test]
    fn server_errors_hide_detail() {
        let err = AppError::db("connection reset by peer");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message().contains("connection reset"));
    }

    #[test]
    fn not_found_maps_to_404() {
        let err: AppError = DomainError::not_found(NotFoundKind::Job, "job not found").into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "job not found");
    }

    #[test]
    fn login_failures_share_one_message() {
        // Wrong password and unknown username must be indistinguishable.
        let a = AppError::invalid_credentials();
        let b = AppError::invalid_credentials();
        assert_eq!(a.status(), b.status());
        assert_eq!(a.message(), b.message());
    }
}
