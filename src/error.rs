//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("connectivity: {0}")]
    Connectivity(#[source] sqlx::Error),
    #[error("schema introspection: {0}")]
    Schema(#[source] sqlx::Error),
    #[error("table '{0}' has no integer identity column")]
    NoIdentity(String),
    #[error("statement execution: {0}")]
    Dml(#[source] sqlx::Error),
    #[error("field {0} have invalid type")]
    InvalidFieldType(String),
    #[error("invalid id")]
    InvalidId,
    #[error("body must be a JSON object")]
    BadBody,
    #[error("unknown table")]
    UnknownTable(String),
    #[error("record not found")]
    RecordNotFound,
    #[error("method not allowed")]
    MethodNotAllowed,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Connectivity(e) => {
                tracing::error!(error = %e, "store unreachable");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
            ApiError::Schema(e) => {
                tracing::error!(error = %e, "schema introspection failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
            ApiError::NoIdentity(table) => {
                tracing::error!(table = %table, "no integer identity column");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
            ApiError::Dml(e) => {
                tracing::error!(error = %e, "statement execution failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
            ApiError::InvalidFieldType(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::InvalidId | ApiError::BadBody => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::UnknownTable(table) => {
                tracing::debug!(table = %table, "unknown table requested");
                (StatusCode::NOT_FOUND, "unknown table".to_string())
            }
            ApiError::RecordNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, self.to_string()),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
