// Copyright 2025 Cowboy AI, LLC.

//! Error responses

use crate::errors::DomainError;
use crate::validation::ValidationErrors;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::error;

/// Either one message or one message per violated rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ErrorMessage {
    /// A single message
    Single(String),
    /// Validation messages in field then rule order
    Many(Vec<String>),
}

/// Body of every error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// HTTP status code
    pub status_code: u16,
    /// Reason phrase of the status
    pub error: String,
    /// What went wrong
    pub message: ErrorMessage,
}

/// An error on its way to becoming a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: ErrorMessage,
}

impl ApiError {
    /// 400 with a single message
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: ErrorMessage::Single(message.into()),
        }
    }

    /// 404 for a cat that does not exist
    pub fn cat_not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: ErrorMessage::Single("Cat not found".to_string()),
        }
    }

    /// 500 without details
    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: ErrorMessage::Single("Internal server error".to_string()),
        }
    }

    /// Status code of the response
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Body of the response
    pub fn body(&self) -> ErrorResponse {
        ErrorResponse {
            status_code: self.status.as_u16(),
            error: self.status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.message.clone(),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: ErrorMessage::Many(errors.messages()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(errors) => errors.into(),
            DomainError::InvalidBreedSelection { .. } => Self::bad_request("Invalid breed selection"),
            DomainError::CatNotFound { .. } => Self::cat_not_found(),
            DomainError::Store(e) => {
                error!(error = %e, "store failure");
                Self::internal()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body())).into_response()
    }
}
