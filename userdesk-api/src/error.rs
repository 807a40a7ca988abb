/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, ApiError>`; whatever they do not turn into a
/// response themselves ends up here.
///
/// Every error body is a JSON object with an `error` field, and a `detail`
/// field where there is something more to say:
///
/// | Variant | Status | `error` |
/// |---|---|---|
/// | `BadRequest` | 400 | `"Bad Request"` |
/// | `NotFound` | 404 | `"Not Found"` |
/// | `UserNotFound` | 404 | `"User not found"` |
/// | `Database` | 500 | `"Database error"` |
/// | `Internal` | 500 | `"Internal Server Error"` |
///
/// # Example
///
/// ```
/// use userdesk_api::error::{ApiError, ApiResult};
/// use axum::Json;
/// use serde_json::json;
///
/// async fn handler(found: bool) -> ApiResult<Json<serde_json::Value>> {
///     if !found {
///         return Err(ApiError::UserNotFound);
///     }
///     Ok(Json(json!({ "ok": true })))
/// }
/// ```

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::{any::Any, fmt};
use userdesk_shared::narrowing::NarrowingError;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or invalid input (400)
    BadRequest(String),

    /// No route matched the request (404)
    NotFound,

    /// No user row matched the requested id (404)
    UserNotFound,

    /// Any failure from the database round trip, including pool timeouts (500)
    Database(String),

    /// Anything unanticipated (500)
    Internal(String),
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short error label
    pub error: String,

    /// Underlying message, passed through verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ApiError {
    /// HTTP status this error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound | ApiError::UserNotFound => StatusCode::NOT_FOUND,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::NotFound => write!(f, "Not found"),
            ApiError::UserNotFound => write!(f, "User not found"),
            ApiError::Database(msg) => write!(f, "Database error: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (error, detail) = match self {
            ApiError::BadRequest(msg) => ("Bad Request", Some(msg)),
            ApiError::NotFound => ("Not Found", None),
            ApiError::UserNotFound => ("User not found", None),
            ApiError::Database(msg) => {
                tracing::error!("Database error: {}", msg);
                ("Database error", Some(msg))
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ("Internal Server Error", Some(msg))
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            detail,
        });

        (status, body).into_response()
    }
}

/// Convert sqlx errors to API errors
///
/// Every driver failure, `RowNotFound` and `PoolTimedOut` included, is a
/// database error; handlers detect missing rows themselves.
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Database(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Convert validator failures into a single readable detail line
///
/// Fields are listed alphabetically, e.g.
/// `email: Invalid email format; username: Username must not be empty`.
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("failed {} check", error.code));
                    format!("{}: {}", field, message)
                })
            })
            .collect();
        messages.sort();

        ApiError::BadRequest(messages.join("; "))
    }
}

impl From<NarrowingError> for ApiError {
    fn from(err: NarrowingError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// Turns a handler panic into an `Internal` error response
///
/// Used with `tower_http::catch_panic::CatchPanicLayer::custom`.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    ApiError::Internal(detail).into_response()
}
