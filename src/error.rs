//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Failures raised by a persistence gateway.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("row encoding: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("{entity} '{id}' does not exist")]
    Missing { entity: &'static str, id: String },
    #[error("{entity} '{id}' already exists")]
    Duplicate { entity: &'static str, id: String },
    #[error("invalid DATABASE_URL: {0}")]
    InvalidUrl(String),
}

/// Startup configuration problems.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var}: invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("store: {0}")]
    Store(StoreError),
    #[error("password hashing: {0}")]
    PasswordHash(String),
}

impl AppError {
    pub fn not_found(entity: &str, id: &str) -> Self {
        AppError::NotFound(format!("{} '{}' not found", entity, id))
    }
}

/// A row vanishing between lookup and write is still a not-found for the caller.
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Missing { entity, id } => AppError::not_found(entity, &id),
            other => AppError::Store(other),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Store(StoreError::Db(err))
    }
}

/// `{ "Message": ..., "Result": "Error" }`
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorBody {
    pub message: String,
    pub result: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(_) | AppError::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "an unexpected error occurred".to_string()
        } else {
            self.to_string()
        };
        let body = ErrorBody {
            message,
            result: "Error".into(),
        };
        (status, Json(body)).into_response()
    }
}
