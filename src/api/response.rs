//! Response envelope and error conversion for the versioned API.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::error::RegistryError;

/// Outcome marker carried by every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResultKind {
    /// Request succeeded.
    Success,
    /// Request failed.
    Error,
}

/// Envelope wrapping every `/api/v1` response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// SUCCESS or ERROR.
    pub result: ResultKind,
    /// Human-readable message.
    pub message: String,
    /// Payload, null on error.
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful response with the default message.
    pub fn success(data: T) -> Self {
        Self::success_with("OK", data)
    }

    /// Successful response with a custom message.
    pub fn success_with(message: impl Into<String>, data: T) -> Self {
        Self {
            result: ResultKind::Success,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Error response without payload.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            result: ResultKind::Error,
            message: message.into(),
            data: None,
        }
    }
}

/// Errors returned by API handlers, mapped onto HTTP statuses.
#[derive(Debug)]
pub enum ApiError {
    /// Registry operation failed.
    Registry(RegistryError),
    /// Malformed request.
    BadRequest(String),
}

impl From<RegistryError> for ApiError {
    fn from(e: RegistryError) -> Self {
        ApiError::Registry(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(e: PathRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Registry(RegistryError::NotFound(_))
            | ApiError::Registry(RegistryError::NameNotFound(_))
            | ApiError::Registry(RegistryError::Deleted(_)) => StatusCode::NOT_FOUND,
            ApiError::Registry(RegistryError::DuplicateName(_)) => StatusCode::CONFLICT,
            ApiError::Registry(RegistryError::Validation(_)) | ApiError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Registry(e) => e.to_string(),
            ApiError::BadRequest(msg) => msg,
        };
        warn!(status = status.as_u16(), "Request failed: {}", message);
        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}
