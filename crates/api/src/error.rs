use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use roster_core::character::duplicate_national_id_message;
use roster_core::error::CoreError;
use roster_core::validation::FieldErrors;
use roster_db::StoreError;
use serde_json::json;
use validator::ValidationErrors;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for storage
/// failures. Implements [`IntoResponse`] so every failure leaves the server
/// as a JSON body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `roster_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage error from `roster_db`.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Input that could not be extracted (malformed JSON, path or query).
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Core(CoreError::Validation(FieldErrors::from(&errors)))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(fields) => {
                    // Field-keyed body: {"name": "must be provided", ...}
                    return (StatusCode::BAD_REQUEST, axum::Json(fields)).into_response();
                }
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::NotFoundBy {
                    entity,
                    field,
                    value,
                } => (
                    StatusCode::NOT_FOUND,
                    format!("{entity} with {field} {value} not found"),
                ),
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            },

            // --- Storage errors ---
            AppError::Store(StoreError::DuplicateNationalId(national_id)) => (
                StatusCode::CONFLICT,
                duplicate_national_id_message(national_id),
            ),
            AppError::Store(StoreError::Database(err)) => {
                tracing::error!(error = %err, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }

            // --- Extraction errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        (status, axum::Json(json!({ "erro": message }))).into_response()
    }
}
