//! API error type and its HTTP mapping.
//!
//! Every library error converges here. Client-facing messages are pt-BR;
//! internal details are logged and replaced by a generic message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lex_auth::AuthError;
use lex_core::errors::CoreError;
use lex_core::responses::ErrorResponse;
use lex_db::error::DatabaseError;
use lex_docx::DocxError;
use thiserror::Error;

pub const MSG_UNAUTHENTICATED: &str = "Sessão inválida ou expirada";
pub const MSG_INTERNAL: &str = "Erro interno do servidor";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    /// Logged in full; the client only sees [`MSG_INTERNAL`].
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Map a repository error, turning `NoResult` into a 404 with `not_found`.
    pub fn db(error: DatabaseError, not_found: &str) -> Self {
        match error {
            DatabaseError::NoResult => Self::NotFound(not_found.to_string()),
            other => other.into(),
        }
    }

    pub fn unauthenticated() -> Self {
        Self::Unauthorized(MSG_UNAUTHENTICATED.to_string())
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::Internal(detail) => {
                tracing::error!(%detail, "request failed");
                MSG_INTERNAL.to_string()
            }
            Self::BadRequest(m) | Self::Unauthorized(m) | Self::NotFound(m) => m,
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(message) => Self::BadRequest(message),
            CoreError::NotFound { .. } => Self::NotFound("Registro não encontrado".to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NoResult => Self::NotFound("Registro não encontrado".to_string()),
            DatabaseError::InvalidReference(_) => {
                Self::NotFound("Cliente não encontrado".to_string())
            }
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::NotAuthenticated | AuthError::InvalidToken | AuthError::TokenExpired => {
                Self::unauthenticated()
            }
            AuthError::InvalidCredentials => {
                Self::Unauthorized("E-mail ou senha inválidos".to_string())
            }
            AuthError::WeakPassword(message) => Self::BadRequest(message),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<DocxError> for ApiError {
    fn from(error: DocxError) -> Self {
        Self::Internal(error.to_string())
    }
}
