use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;
use validator::Validate;

use crate::auth::jwt::CurrentUser;
use crate::dsr::dto::{
    CreateDsrRequest, DsrDetails, DsrListResponse, DsrResponse, ListDsrQuery, UpdateDsrRequest,
};
use crate::dsr::services;
use crate::error::ApiError;
use crate::state::AppState;
use crate::validate::ValidatedJson;

pub fn dsr_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/dsr",
            get(list_dsrs).post(create_dsr).put(update_dsr),
        )
        .route("/dsr/:dsr_id", get(get_dsr))
}

#[instrument(skip(state, user, payload))]
async fn create_dsr(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateDsrRequest>,
) -> Result<(StatusCode, Json<DsrResponse>), ApiError> {
    let dsr = services::create_dsr(&state, user.id, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(DsrResponse {
            message: "DSR created".into(),
            dsr,
        }),
    ))
}

#[instrument(skip(state, user, payload))]
async fn update_dsr(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(payload): ValidatedJson<UpdateDsrRequest>,
) -> Result<Json<DsrResponse>, ApiError> {
    let dsr = services::update_dsr(&state, user.id, payload).await?;
    Ok(Json(DsrResponse {
        message: "DSR updated".into(),
        dsr,
    }))
}

#[instrument(skip(state, user))]
async fn list_dsrs(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<ListDsrQuery>,
) -> Result<Json<DsrListResponse>, ApiError> {
    query.validate()?;
    let (dsrs, total) = services::list_dsrs(&state, user.id, &query).await?;
    Ok(Json(DsrListResponse { dsrs, total }))
}

#[instrument(skip(state, user))]
async fn get_dsr(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(dsr_id): Path<i64>,
) -> Result<Json<DsrDetails>, ApiError> {
    let dsr = services::get_dsr(&state, user.id, dsr_id).await?;
    Ok(Json(DsrDetails { dsr }))
}
