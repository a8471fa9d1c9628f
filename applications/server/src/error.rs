/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ebazar_core::CoreError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

/// The one message every authorization failure surfaces with. Missing
/// credential, bad token, and owner mismatch are indistinguishable on
/// the wire.
pub const UNAUTHORIZED_MESSAGE: &str = "unauthorized access";

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("unauthorized access")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Store error: {0}")]
    Store(#[from] CoreError),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServerError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, UNAUTHORIZED_MESSAGE.to_string())
            }
            ServerError::Jwt(ref e) => {
                // Bad signature, malformed token, expiry: all collapse
                // into the uniform unauthorized response
                tracing::debug!("JWT error: {:?}", e);
                (StatusCode::UNAUTHORIZED, UNAUTHORIZED_MESSAGE.to_string())
            }
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::Store(CoreError::NotFound { entity, id }) => {
                (StatusCode::NOT_FOUND, format!("{entity} not found: {id}"))
            }
            ServerError::Store(ref e) => {
                tracing::error!("Store error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "store error".to_string())
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "configuration error".to_string(),
                )
            }
            ServerError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            ServerError::Io(ref e) => {
                tracing::error!("IO error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "IO error".to_string())
            }
        };

        let body = Json(json!({
            "error": true,
            "message": message,
        }));

        (status, body).into_response()
    }
}
