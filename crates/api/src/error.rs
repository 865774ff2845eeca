use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use filmlog_core::error::CoreError;
use filmlog_tmdb::TmdbError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the `{error}` /
/// `{error, details}` JSON envelopes the client expects.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `filmlog_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A failure talking to the metadata provider.
    #[error(transparent)]
    Tmdb(#[from] TmdbError),

    /// The server-held provider credential is unset.
    #[error("TMDb API key not configured")]
    MissingApiKey,

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, .. } => (
                    StatusCode::NOT_FOUND,
                    json!({ "error": format!("{entity} not found in watched list") }),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, json!({ "error": msg }))
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        json!({ "error": "Internal server error" }),
                    )
                }
            },

            // --- Database errors: 500 with the datastore's message attached ---
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Database error", "details": err.to_string() }),
                )
            }

            // --- Provider errors ---
            // Non-2xx provider responses pass through with the provider's
            // own status code and error body; transport failures are ours.
            AppError::Tmdb(TmdbError::Api { status, details }) => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                json!({ "error": "TMDb API error", "details": details }),
            ),
            AppError::Tmdb(TmdbError::Request(err)) => {
                tracing::error!(error = %err, "TMDb request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }

            // --- Configuration ---
            AppError::MissingApiKey => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "TMDb API key not configured" }),
            ),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}
