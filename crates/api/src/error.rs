use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use casting_core::error::{AuthError, CoreError};
use casting_db::error::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps the domain, auth and store errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the
/// `{ "success": false, "error": <status>, "code", "message" }` body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `casting_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Bearer-credential or permission failure.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A store failure while reading. Reported as 500.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A store failure while creating, updating or deleting. Reported as 422.
    #[error("Unprocessable: {0}")]
    Unprocessable(StoreError),

    /// A malformed request (bad JSON, bad path parameter).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No route matched the request path.
    #[error("Route not found: {0}")]
    RouteNotFound(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    /// Wrap a store failure that happened during a mutation.
    ///
    /// A row that disappeared mid-request is still a 404.
    pub fn unprocessable(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AppError::Store(StoreError::NotFound),
            other => AppError::Unprocessable(other),
        }
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::EmptyCollection { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", core.to_string())
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Auth errors ---
            AppError::Auth(auth) => {
                let status = if auth.is_forbidden() {
                    StatusCode::FORBIDDEN
                } else {
                    StatusCode::UNAUTHORIZED
                };
                (status, auth.code(), auth.to_string())
            }

            // --- Store errors ---
            AppError::Store(StoreError::NotFound) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Resource not found".to_string(),
            ),
            AppError::Store(err) => {
                tracing::error!(error = %err, "Store error while reading");
                internal()
            }
            AppError::Unprocessable(err) => {
                tracing::error!(error = %err, "Store error while writing");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "UNPROCESSABLE_ENTITY",
                    "The request could not be processed".to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::RouteNotFound(path) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("No route for {path}"),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        error_response(status, code, message)
    }
}

/// Build the error envelope for `status`.
pub fn error_response(status: StatusCode, code: &str, message: String) -> Response {
    let body = json!({
        "success": false,
        "error": status.as_u16(),
        "code": code,
        "message": message,
    });

    (status, axum::Json(body)).into_response()
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
