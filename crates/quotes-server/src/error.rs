//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use quotes_core::QuoteError;
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl ApiError {
    pub fn not_found(message: &str) -> Self {
        ApiError::NotFound(message.to_string())
    }

    pub fn bad_request(message: &str) -> Self {
        ApiError::BadRequest(message.to_string())
    }

    /// Maps a store error, answering 500s with `message` and logging the cause.
    pub fn store(message: &'static str) -> impl FnOnce(QuoteError) -> ApiError {
        move |err| match err {
            QuoteError::InvalidInput(reason) => ApiError::BadRequest(reason),
            err if err.is_not_found() => ApiError::NotFound(err.to_string()),
            err => {
                tracing::error!("{}: {}", message, err);
                ApiError::Internal(message.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}
