use tracing::info;

use crate::dsr::dto::{CreateDsrRequest, ListDsrQuery, UpdateDsrRequest};
use crate::dsr::repo::{self, Dsr};
use crate::error::ApiError;
use crate::state::AppState;

/// Project label stamped on every report at creation.
pub const PROJECT_LABEL: &str = "DSR System";

pub async fn create_dsr(
    state: &AppState,
    user_id: i64,
    req: CreateDsrRequest,
) -> Result<Dsr, ApiError> {
    let dsr = repo::insert(
        &state.db,
        user_id,
        &req.content,
        req.hours,
        req.date,
        PROJECT_LABEL,
    )
    .await?;
    info!(user_id, dsr_id = dsr.id, "dsr created");
    Ok(dsr)
}

pub async fn update_dsr(
    state: &AppState,
    user_id: i64,
    req: UpdateDsrRequest,
) -> Result<Dsr, ApiError> {
    let updated = repo::update_owned(
        &state.db,
        req.id,
        user_id,
        req.content.as_deref(),
        req.hours,
    )
    .await?
    .ok_or_else(|| ApiError::not_found("DSR not found"))?;
    info!(user_id, dsr_id = updated.id, "dsr updated");
    Ok(updated)
}

pub async fn list_dsrs(
    state: &AppState,
    user_id: i64,
    query: &ListDsrQuery,
) -> Result<(Vec<Dsr>, i64), ApiError> {
    let total = repo::count(&state.db, user_id, query.start_date, query.end_date).await?;
    let dsrs = repo::list_page(
        &state.db,
        user_id,
        query.start_date,
        query.end_date,
        query.limit,
        query.offset(),
    )
    .await?;
    Ok((dsrs, total))
}

pub async fn get_dsr(state: &AppState, user_id: i64, dsr_id: i64) -> Result<Dsr, ApiError> {
    repo::find_owned(&state.db, dsr_id, user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("DSR not found"))
}
