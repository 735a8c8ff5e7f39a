use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::postgres::PostgresError;
use crate::product::StoreError;

/// HTTP error response rendered as a JSON error envelope: `{"error": "..."}`.
#[derive(Debug)]
pub struct HttpError {
    pub status: StatusCode,
    pub message: String,
}

impl HttpError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        HttpError { status, message: message.into() }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

pub fn internal_server_error(message: Option<String>) -> HttpError {
    HttpError::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        message.unwrap_or("Internal server error".to_string()),
    )
}

pub fn bad_request(message: String) -> HttpError {
    HttpError::new(StatusCode::BAD_REQUEST, message)
}

pub fn unauthorized(message: Option<String>) -> HttpError {
    HttpError::new(StatusCode::UNAUTHORIZED, message.unwrap_or("Authorization failed".to_string()))
}

pub fn forbidden(message: String) -> HttpError {
    HttpError::new(StatusCode::FORBIDDEN, message)
}

impl From<PostgresError> for HttpError {
    fn from(error: PostgresError) -> HttpError {
        error!("Postgres error occurred - {:?}", error);
        internal_server_error(None)
    }
}

impl From<StoreError> for HttpError {
    fn from(error: StoreError) -> HttpError {
        error!("Store error occurred - {:?}", error);
        internal_server_error(None)
    }
}
