use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;

use crate::errors::AppError;
use crate::models::user::UserPublic;
use crate::AppState;

/// Authenticated caller, extracted from the bearer access token. The user
/// snapshot comes straight from the token claims — no lookup per request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: UserPublic,
    pub access_token: String,
}

/// Middleware guarding every protected route: the access token must decode,
/// carry a user snapshot, and not be blacklisted. Any failure is the same
/// `INVALID_TOKEN` response.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers()).ok_or(AppError::InvalidToken)?;
    let claims = state
        .sessions
        .codec()
        .decode(token)
        .ok_or(AppError::InvalidToken)?;
    let user = claims.data.ok_or(AppError::InvalidToken)?;

    if state.sessions.store().is_blacklisted(token).await? {
        return Err(AppError::InvalidToken);
    }

    let access_token = token.to_string();
    req.extensions_mut().insert(AuthUser { user, access_token });
    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_token_missing_or_malformed() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("abc.def"));
        assert_eq!(bearer_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );
        assert_eq!(bearer_token(&headers), None);
    }
}
