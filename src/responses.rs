use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Machine-readable outcome code carried in every JSON envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    Ok,
    UserNotFound,
    UserAlreadyExists,
    IncorrectPassword,
    InvalidToken,
    ProductListCannotBeEmpty,
    NotEnoughMoney,
    EmptyCheck,
    CheckNotFound,
    ValidationError,
    InternalError,
}

/// Standard response envelope: `{custom_code, message?, data}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub custom_code: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            custom_code: ResponseStatus::Ok,
            message: None,
            data: Some(data),
        }
    }
}

impl Envelope<()> {
    /// Success with no payload (logout and friends).
    pub fn empty() -> Self {
        Self {
            custom_code: ResponseStatus::Ok,
            message: None,
            data: None,
        }
    }

    pub fn error(custom_code: ResponseStatus, message: impl Into<String>) -> Self {
        Self {
            custom_code,
            message: Some(message.into()),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Page of results plus the bookkeeping the UI needs to render a pager.
#[derive(Debug, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub total_count: i64,
    pub page_count: i64,
    pub next: Option<i64>,
    pub previous: Option<i64>,
    pub results: Vec<T>,
}
