use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::calculation::CalculationError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Missing required fields: {0:?}")]
    MissingFields(Vec<&'static str>),

    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("Too many requests")]
    TooManyRequests,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    required: Option<Vec<&'static str>>,
}

impl ErrorBody {
    fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            details: None,
            required: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorBody::new(msg)),
            AppError::MissingFields(fields) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    required: Some(fields),
                    ..ErrorBody::new("Missing required fields")
                },
            ),
            AppError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    details: Some(details),
                    ..ErrorBody::new("Validation failed")
                },
            ),
            AppError::TooManyRequests => (
                StatusCode::TOO_MANY_REQUESTS,
                ErrorBody::new("Too many requests from this IP, please try again later."),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new("Internal server error"))
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Internal(e.into())
    }
}

impl From<CalculationError> for AppError {
    fn from(e: CalculationError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}
