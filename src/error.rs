use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use sqlx::error::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Authentication required.")]
    Unauthenticated,

    #[error("{0}")]
    Authorization(String),

    #[error("{0} not found.")]
    NotFound(&'static str),

    #[error("{0}")]
    Integrity(String),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if matches!(err, sqlx::Error::RowNotFound) {
            return AppError::NotFound("Record");
        }
        if let sqlx::Error::Database(db_err) = &err {
            // Postgres constraint violations: foreign key, unique, check.
            match db_err.code().as_deref() {
                Some("23503") => {
                    return AppError::Integrity("Referenced record does not exist.".to_string())
                }
                Some("23505") => {
                    return AppError::Integrity("A record with this value already exists.".to_string())
                }
                Some("23514") => {
                    return AppError::Integrity("Value rejected by a database constraint.".to_string())
                }
                _ => {}
            }
        }
        AppError::Database(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Authorization(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Integrity(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Store and crypto failures are logged but never leak details to the caller.
        let message = match &self {
            AppError::Database(err) => {
                tracing::error!("database error: {err}");
                "Something went wrong on the server.".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                "Something went wrong on the server.".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "status": "error",
            "message": message
        }));

        (status, body).into_response()
    }
}
