use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::datasource::DataSourceError;
use crate::domain::ExchangeInputError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl From<DataSourceError> for AppError {
    fn from(err: DataSourceError) -> Self {
        match err {
            DataSourceError::Unauthorized(msg) => AppError::Unauthorized(msg),
            // Upstream input rejections (e.g. insufficient balance) are the caller's fault.
            DataSourceError::HttpError { status, message } if (400..500).contains(&status) => {
                AppError::BadRequest(message)
            }
            other => AppError::Upstream(other.to_string()),
        }
    }
}

impl From<ExchangeInputError> for AppError {
    fn from(err: ExchangeInputError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
