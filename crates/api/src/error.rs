use annotater_core::error::CoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `annotater_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a core error into an HTTP status, error code and message.
///
/// Pipeline wrappers are classified by their innermost error. Server-side
/// failures are logged in full and answered with a sanitized message that
/// still names the document or the entity being accessed.
fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    let root = err.root();
    match root {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::DocumentFormat { .. } => (
            StatusCode::BAD_REQUEST,
            "UNSUPPORTED_FORMAT",
            root.to_string(),
        ),
        CoreError::DuplicateMarkupType { .. } => {
            (StatusCode::CONFLICT, "CONFLICT", root.to_string())
        }
        CoreError::ViolatingKey(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        _ => {
            tracing::error!(error = %err, "Request failed");
            let message = match err {
                CoreError::Pipeline {
                    stage, document_id, ..
                } => format!("Document {document_id}: {stage} failed"),
                CoreError::Storage { context, .. } => format!("Storage failure while {context}"),
                _ => INTERNAL_MESSAGE.to_string(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
        }
    }
}
