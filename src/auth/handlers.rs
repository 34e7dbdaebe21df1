use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::auth::dto::{
    EmailRequest, LoginRequest, LoginResponse, MessageResponse, OtpResponse, PublicUser,
    SignupRequest, SignupResponse, UpdateProfileRequest, VerifyOtpRequest,
};
use crate::auth::jwt::CurrentUser;
use crate::auth::services;
use crate::error::ApiError;
use crate::state::AppState;
use crate::validate::ValidatedJson;

pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/forget-password", post(forget_password))
        .route("/resend-otp", post(resend_otp))
        .route("/verify-otp", post(verify_otp))
}

pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/profile", get(get_profile).put(update_profile))
}

#[instrument(skip(state, payload))]
async fn signup(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    let (user, token) = services::signup(&state, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created successfully".into(),
            user: user.into(),
            token,
        }),
    ))
}

#[instrument(skip(state, payload))]
async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let token = services::login(&state, payload).await?;
    Ok(Json(LoginResponse { token }))
}

#[instrument(skip(user))]
async fn get_profile(CurrentUser(user): CurrentUser) -> Json<PublicUser> {
    Json(user.into())
}

#[instrument(skip(state, user, payload))]
async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<PublicUser>, ApiError> {
    let updated = services::update_profile(&state, user, payload).await?;
    Ok(Json(updated.into()))
}

#[instrument(skip(state, payload))]
async fn forget_password(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<EmailRequest>,
) -> Result<Json<OtpResponse>, ApiError> {
    let otp = services::send_otp(&state, &payload.email).await?;
    Ok(Json(OtpResponse {
        message: "OTP sent successfully".into(),
        otp,
    }))
}

#[instrument(skip(state, payload))]
async fn resend_otp(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<EmailRequest>,
) -> Result<Json<OtpResponse>, ApiError> {
    let otp = services::send_otp(&state, &payload.email).await?;
    Ok(Json(OtpResponse {
        message: "OTP resent successfully".into(),
        otp,
    }))
}

#[instrument(skip(state, payload))]
async fn verify_otp(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<VerifyOtpRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    services::verify_otp(&state, payload).await?;
    Ok(Json(MessageResponse {
        message: "OTP verified successfully".into(),
    }))
}
