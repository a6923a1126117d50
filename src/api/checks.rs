use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use chrono::{NaiveDateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::middleware::auth::AuthUser;
use crate::models::check::{Check, PaymentInput, PaymentType, ProductInput};
use crate::query::{parse_ordering, Page};
use crate::responses::{Envelope, Paginated};
use crate::store::postgres::CheckFilters;
use crate::AppState;

// ── Request DTOs ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CheckCreateRequest {
    pub products: Vec<ProductInput>,
    pub payment: PaymentInput,
}

#[derive(Deserialize)]
pub struct CheckListParams {
    pub search: Option<String>,
    /// Example: 2024-04-01T00:00:00
    pub created_at_before: Option<NaiveDateTime>,
    pub created_at_after: Option<NaiveDateTime>,
    pub total_gte: Option<i64>,
    pub total_lte: Option<i64>,
    pub payment_type: Option<PaymentType>,
    pub ordering: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

// ── Handlers ─────────────────────────────────────────────────

/// POST /checks/ — validate, derive totals and persist atomically.
pub async fn create_check(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CheckCreateRequest>,
) -> Result<Envelope<Check>, AppError> {
    let check = Check::build(
        Uuid::new_v4(),
        Utc::now(),
        payload.products,
        payload.payment,
    )?;
    state.db.create_check(auth.user.uuid, &check).await?;
    tracing::info!(check = %check.uuid, user = %auth.user.uuid, total = check.total, "check created");
    Ok(Envelope::ok(check))
}

/// GET /checks/ — the caller's checks, filtered, ordered and paginated.
pub async fn get_checks(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Query(params): Query<CheckListParams>,
) -> Result<Envelope<Paginated<Check>>, AppError> {
    let page = Page::new(params.page, params.page_size);
    let order = parse_ordering(params.ordering.as_deref());
    let filters = CheckFilters {
        search: params.search,
        created_at_before: params.created_at_before.map(|t| t.and_utc()),
        created_at_after: params.created_at_after.map(|t| t.and_utc()),
        total_gte: params.total_gte,
        total_lte: params.total_lte,
        payment_type: params.payment_type,
    };

    let (total_count, rows) = state
        .db
        .get_checks(auth.user.uuid, &filters, &order, page)
        .await?;
    let results = rows
        .into_iter()
        .map(|row| row.into_check())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Envelope::ok(Paginated {
        total_count,
        page_count: page.page_count(total_count),
        next: page.next(total_count),
        previous: page.previous(),
        results,
    }))
}

/// GET /checks/{uuid} — a single check, scoped to the caller.
pub async fn get_check(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(check_uuid): Path<Uuid>,
) -> Result<Envelope<Check>, AppError> {
    let row = state
        .db
        .get_check(check_uuid, Some(auth.user.uuid))
        .await?
        .ok_or(AppError::CheckNotFound)?;
    Ok(Envelope::ok(row.into_check()?))
}
