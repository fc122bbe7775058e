//! Error responses for the HTTP API.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{debug, error};
use prdwiz_core::PrdError;
use serde_json::json;

/// An error rendered as `{"error": message}` with a matching status code.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    /// The request body could not be read as JSON of the expected shape
    Body(JsonRejection),
    Core(PrdError),
}

impl From<PrdError> for ApiError {
    fn from(error: PrdError) -> Self {
        ApiError::Core(error)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Body(rejection)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Body(rejection) => rejection.status(),
            ApiError::Core(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            ApiError::Core(PrdError::Validation { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Core(e) if e.is_user_error() => StatusCode::BAD_REQUEST,
            ApiError::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::NotFound(message) => message,
            ApiError::Body(rejection) => {
                debug!("Rejected request body: {rejection}");
                rejection.body_text()
            }
            ApiError::Core(e) => {
                if status.is_server_error() {
                    error!("Request failed: {e}");
                }
                e.to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
