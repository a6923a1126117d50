use std::sync::Arc;

use axum::extract::State;
use axum::{Extension, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::middleware::auth::AuthUser;
use crate::models::user::UserPublic;
use crate::responses::Envelope;
use crate::AppState;

#[derive(Deserialize)]
pub struct UserUpdateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// GET /users/me — the caller's snapshot, straight from the token claims.
pub async fn me(Extension(auth): Extension<AuthUser>) -> Envelope<UserPublic> {
    Envelope::ok(auth.user)
}

/// PATCH /users/me — partial profile update. The token snapshot stays as
/// issued; callers see the new values after their next login or refresh.
pub async fn update_me(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<UserUpdateRequest>,
) -> Result<Envelope<UserPublic>, AppError> {
    if payload.name.is_none() && payload.email.is_none() {
        return Ok(Envelope::ok(auth.user));
    }
    if let Some(name) = &payload.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("name cannot be empty".to_string()));
        }
    }

    let user = state
        .db
        .update_user(
            auth.user.uuid,
            payload.name.as_deref(),
            payload.email.as_deref(),
        )
        .await?
        .ok_or(AppError::UserNotFound)?;
    Ok(Envelope::ok(user))
}
