/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, ApiError>`; store, dispatch, form and
/// remote errors convert into it with `?`.
///
/// | source                                   | status |
/// |------------------------------------------|--------|
/// | `StoreError::ConstraintViolation`        | 409    |
/// | `StoreError::NotFound`                   | 404    |
/// | `FormError`                              | 422    |
/// | `TransportError::Status` / `Decode` / `Other` | 502 |
/// | `TransportError::NoConnectivity`, `DispatchError::Closed` | 503 |
/// | `TransportError::TimedOut`               | 504    |
/// | `StoreError::StorageFailure` / `SchemaOutdated` | 500 |
///
/// # Example
///
/// ```no_run
/// use roster_api::error::ApiResult;
/// use axum::Json;
/// use roster_shared::remote::{Post, PostSource};
///
/// async fn handler(source: &dyn PostSource) -> ApiResult<Json<Vec<Post>>> {
///     let posts = source.list_posts().await?;
///     Ok(Json(posts))
/// }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use roster_shared::error::StoreError;
use roster_shared::form::FormError;
use roster_shared::remote::TransportError;
use roster_worker::dispatcher::DispatchError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Not found (404)
    NotFound(String),

    /// Conflict (409), e.g. duplicate email
    Conflict(String),

    /// Unprocessable entity (422), form validation errors
    ValidationError(Vec<ValidationErrorDetail>),

    /// Internal server error (500)
    InternalError(String),

    /// Bad gateway (502), the remote collection misbehaved
    BadGateway(String),

    /// Service unavailable (503)
    ServiceUnavailable(String),

    /// Gateway timeout (504)
    GatewayTimeout(String),
}

/// Validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "not_found", "conflict")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            ApiError::BadGateway(msg) => write!(f, "Bad gateway: {}", msg),
            ApiError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            ApiError::GatewayTimeout(msg) => write!(f, "Gateway timeout: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::ValidationError(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                "Request validation failed".to_string(),
                Some(errors),
            ),
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, "bad_gateway", msg, None),
            ApiError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                msg,
                None,
            ),
            ApiError::GatewayTimeout(msg) => {
                (StatusCode::GATEWAY_TIMEOUT, "gateway_timeout", msg, None)
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Convert store errors to API errors
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ConstraintViolation(msg) => ApiError::Conflict(msg),
            StoreError::NotFound(id) => ApiError::NotFound(format!("Record {} not found", id)),
            StoreError::StorageFailure(e) => ApiError::InternalError(format!("Storage failure: {}", e)),
            err @ StoreError::SchemaOutdated { .. } => ApiError::InternalError(err.to_string()),
        }
    }
}

/// Convert dispatcher errors to API errors
impl From<DispatchError> for ApiError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::Store(e) => e.into(),
            DispatchError::Closed => {
                ApiError::ServiceUnavailable("Record service is not running".to_string())
            }
        }
    }
}

/// Convert form errors to API errors
impl From<FormError> for ApiError {
    fn from(err: FormError) -> Self {
        ApiError::ValidationError(
            err.0
                .into_iter()
                .map(|e| ValidationErrorDetail {
                    field: e.field,
                    message: e.message,
                })
                .collect(),
        )
    }
}

/// Convert remote fetch errors to API errors
impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        let message = err.user_message();
        match err {
            TransportError::NoConnectivity(_) => ApiError::ServiceUnavailable(message),
            TransportError::TimedOut => ApiError::GatewayTimeout(message),
            TransportError::Status(_) | TransportError::Decode(_) | TransportError::Other(_) => {
                ApiError::BadGateway(message)
            }
        }
    }
}
