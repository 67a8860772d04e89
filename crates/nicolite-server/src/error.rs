//! API error types.

use std::any::Any;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use nicolite_core::{MirrorAttempt, NicoError};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    /// Upstream answered with a status that is passed through as-is
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },

    #[error("{message}")]
    BadGateway {
        message: String,
        detail: Option<MirrorAttempt>,
    },

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream { status, .. } => *status,
            ApiError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<NicoError> for ApiError {
    fn from(err: NicoError) -> Self {
        match err {
            NicoError::MissingVideoId | NicoError::EmptyQuery | NicoError::BadId => {
                ApiError::bad_request(err.to_string())
            }
            NicoError::UpstreamStatus { status, .. } => ApiError::Upstream {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                message: err.to_string(),
            },
            NicoError::MirrorsExhausted(last) => ApiError::BadGateway {
                message: NicoError::MirrorsExhausted(None).to_string(),
                detail: last,
            },
            other => ApiError::internal(other.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    ok: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<MirrorAttempt>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error = self.to_string();
        let detail = match self {
            ApiError::BadGateway { detail, .. } => detail,
            _ => None,
        };

        let body = ErrorResponse {
            ok: false,
            error,
            detail,
        };

        (status, Json(body)).into_response()
    }
}

/// Turns a handler panic into a JSON 500.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "internal error".to_string()
    };

    error!(panic = %message, "Handler panicked");
    ApiError::internal(message).into_response()
}
