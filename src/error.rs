//! Error taxonomy and HTTP error responses.
//!
//! [`AppError`] is the single error type crossing the policy engine and the
//! request surface. Store and identity-provider failures keep their own enums
//! so callers can tell a timeout from a driver error when logging.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::time::Duration;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Structured error payload returned to clients.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Failures raised by the document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store operation '{operation}' timed out after {timeout:?}")]
    Timeout {
        operation: &'static str,
        timeout: Duration,
    },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Identity provider failures other than "user not found".
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("identity provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("identity provider returned {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    #[error("identity provider misconfigured: {0}")]
    Config(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("user not found")]
    UserNotFound { user_id: String },

    #[error("limit of slugs reached")]
    RateLimitExceeded {
        user_id: String,
        limit: u64,
        window_days: i64,
    },

    #[error("slug not found")]
    SlugNotFound { token: String },

    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    IdentityProvider(#[from] IdentityError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::UserNotFound { .. }
            | AppError::RateLimitExceeded { .. }
            | AppError::SlugNotFound { .. }
            | AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Store(_) | AppError::IdentityProvider(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Converts the error into its client-facing payload.
    ///
    /// Store and provider failures are reported generically; their source is
    /// only logged.
    pub fn to_error_info(&self) -> ErrorInfo {
        match self {
            AppError::UserNotFound { user_id } => ErrorInfo {
                code: "user_not_found",
                message: "User not found".to_string(),
                details: json!({ "uid": user_id }),
            },
            AppError::RateLimitExceeded {
                user_id,
                limit,
                window_days,
            } => ErrorInfo {
                code: "rate_limit_exceeded",
                message: "Limit of slugs reached".to_string(),
                details: json!({ "uid": user_id, "limit": limit, "window_days": window_days }),
            },
            AppError::SlugNotFound { token } => ErrorInfo {
                code: "slug_not_found",
                message: "Slug not found".to_string(),
                details: json!({ "token": token }),
            },
            AppError::Validation { message, details } => ErrorInfo {
                code: "validation_error",
                message: message.clone(),
                details: details.clone(),
            },
            AppError::Store(StoreError::Timeout { operation, .. }) => ErrorInfo {
                code: "store_error",
                message: "Store operation timed out".to_string(),
                details: json!({ "operation": operation }),
            },
            AppError::Store(_) => ErrorInfo {
                code: "store_error",
                message: "Store error".to_string(),
                details: json!({}),
            },
            AppError::IdentityProvider(_) => ErrorInfo {
                code: "identity_provider_error",
                message: "Identity provider error".to_string(),
                details: json!({}),
            },
            AppError::Internal(_) => ErrorInfo {
                code: "internal_error",
                message: "Internal server error".to_string(),
                details: json!({}),
            },
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Invalid request", details)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Invalid JSON body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(
            "Invalid query parameters",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

impl From<crate::domain::entities::ParseSlugIdError> for AppError {
    fn from(e: crate::domain::entities::ParseSlugIdError) -> Self {
        AppError::bad_request("Invalid slug id", json!({ "id": e.input }))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}
