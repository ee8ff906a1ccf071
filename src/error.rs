use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("State mismatch")]
    StateMismatch,

    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Upstream rejected credential")]
    AuthorizationRejected,

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::StateMismatch => (StatusCode::FORBIDDEN, self.to_string()),
            // An exchange failure ends the login attempt; the caller has to
            // start over, so this reads as a client error, not a 5xx.
            AppError::TokenExchange(ref e) => {
                tracing::error!("Token exchange failed: {}", e);
                (StatusCode::FORBIDDEN, "Token exchange failed".to_string())
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::AuthorizationRejected => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::Decode(ref e) => {
                tracing::error!("Upstream response decode failed: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "Upstream response decode failed".to_string(),
                )
            }
            AppError::Internal(ref e) => {
                tracing::error!("Internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
