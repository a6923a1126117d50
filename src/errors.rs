use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::responses::{Envelope, ResponseStatus};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("user not found")]
    UserNotFound,

    #[error("user with this email already exists")]
    UserAlreadyExists,

    #[error("incorrect password")]
    IncorrectPassword,

    #[error("token invalid or expired")]
    InvalidToken,

    #[error("the product list cannot be empty")]
    ProductListEmpty,

    #[error("not enough money")]
    NotEnoughMoney,

    #[error("check is empty")]
    EmptyCheck,

    #[error("check not found")]
    CheckNotFound,

    #[error("{0}")]
    Validation(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn custom_code(&self) -> ResponseStatus {
        match self {
            AppError::UserNotFound => ResponseStatus::UserNotFound,
            AppError::UserAlreadyExists => ResponseStatus::UserAlreadyExists,
            AppError::IncorrectPassword => ResponseStatus::IncorrectPassword,
            AppError::InvalidToken => ResponseStatus::InvalidToken,
            AppError::ProductListEmpty => ResponseStatus::ProductListCannotBeEmpty,
            AppError::NotEnoughMoney => ResponseStatus::NotEnoughMoney,
            AppError::EmptyCheck => ResponseStatus::EmptyCheck,
            AppError::CheckNotFound => ResponseStatus::CheckNotFound,
            AppError::Validation(_) => ResponseStatus::ValidationError,
            AppError::Database(_) | AppError::Redis(_) | AppError::Internal(_) => {
                ResponseStatus::InternalError
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "User not found".to_string()),
            AppError::UserAlreadyExists => (
                StatusCode::CONFLICT,
                "User with this email already exists".to_string(),
            ),
            AppError::IncorrectPassword => {
                (StatusCode::UNAUTHORIZED, "Incorrect password".to_string())
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token invalid or expired".to_string(),
            ),
            AppError::ProductListEmpty => (
                StatusCode::BAD_REQUEST,
                "The product list cannot be empty".to_string(),
            ),
            AppError::NotEnoughMoney => (StatusCode::BAD_REQUEST, "Not enough money".to_string()),
            AppError::EmptyCheck => (StatusCode::BAD_REQUEST, "Check is empty".to_string()),
            AppError::CheckNotFound => (StatusCode::NOT_FOUND, "Check not found".to_string()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Database(e) => {
                tracing::error!("database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            AppError::Redis(e) => {
                tracing::error!("redis error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = Json(Envelope::error(self.custom_code(), msg));
        (status, body).into_response()
    }
}
