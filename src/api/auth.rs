use std::sync::Arc;

use axum::extract::State;
use axum::{Extension, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::middleware::auth::AuthUser;
use crate::models::session::Session;
use crate::responses::Envelope;
use crate::AppState;

// ── Request DTOs ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: Option<String>,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

// ── Handlers ─────────────────────────────────────────────────

/// POST /register — create a user and hand back their first session.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Envelope<Session>, AppError> {
    let password = payload.password.trim();
    let length = password.chars().count();
    if !(8..=20).contains(&length) {
        return Err(AppError::Validation(
            "password must be between 8 and 20 characters".to_string(),
        ));
    }

    let digest = state.credentials.hash(password)?;
    let user = state
        .db
        .create_user(&payload.name, payload.email.as_deref(), &digest)
        .await?;
    tracing::info!(user = %user.uuid, "registered new user");

    let session = state.sessions.create_session(&user).await?;
    Ok(Envelope::ok(session))
}

/// POST /login — verify credentials, mint a session.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Envelope<Session>, AppError> {
    let row = state
        .db
        .get_user_by_email(&payload.email)
        .await?
        .ok_or(AppError::UserNotFound)?;

    // A user without a stored digest can never log in with a password.
    let verified = row
        .hashed_password
        .as_deref()
        .map(|digest| state.credentials.verify(&payload.password, digest))
        .unwrap_or(false);
    if !verified {
        return Err(AppError::IncorrectPassword);
    }

    let session = state.sessions.create_session(&row.into_public()).await?;
    Ok(Envelope::ok(session))
}

/// POST /refresh-token — exchange the caller's bound pair for a new session.
pub async fn refresh_token(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Envelope<Session>, AppError> {
    let session = state
        .sessions
        .refresh_session(&state.db, &auth.access_token, &payload.refresh_token)
        .await?;
    Ok(Envelope::ok(session))
}

/// DELETE /logout — blacklist the caller's access token. Idempotent.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Envelope<()>, AppError> {
    state.sessions.logout(&auth.access_token).await?;
    Ok(Envelope::empty())
}

/// DELETE /logout-all — revoke every live session of the caller.
pub async fn logout_all(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Envelope<()>, AppError> {
    state.sessions.logout_all(auth.user.uuid).await?;
    Ok(Envelope::empty())
}
