use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use crate::receipt;
use crate::AppState;

/// GET /client/{uuid} — plain-text receipt, no authentication. Any failure
/// (missing check, storage error) surfaces as a bare 404.
pub async fn get_check_for_client(
    State(state): State<Arc<AppState>>,
    Path(check_uuid): Path<Uuid>,
) -> Result<String, (StatusCode, String)> {
    let not_found = || (StatusCode::NOT_FOUND, "Check not found".to_string());

    let row = state
        .db
        .get_check(check_uuid, None)
        .await
        .map_err(|e| {
            tracing::error!("client receipt lookup failed: {}", e);
            not_found()
        })?
        .ok_or_else(not_found)?;
    let check = row.into_check().map_err(|_| not_found())?;

    Ok(receipt::render(&check, &state.config.receipt))
}
