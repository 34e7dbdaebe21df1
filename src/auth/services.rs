use axum::extract::FromRef;
use tracing::{info, warn};

use crate::auth::dto::{LoginRequest, SignupRequest, UpdateProfileRequest, VerifyOtpRequest};
use crate::auth::jwt::JwtKeys;
use crate::auth::otp;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::repo::User;
use crate::error::ApiError;
use crate::state::AppState;

// one message for unknown email and wrong password alike
const LOGIN_FAILED: &str = "Invalid email or password";

pub async fn signup(state: &AppState, req: SignupRequest) -> Result<(User, String), ApiError> {
    let email = req.email.trim().to_lowercase();
    let hash = hash_password(&req.password)?;
    let profile_picture = req.profile_picture.filter(|p| !p.is_empty());

    let user = User::create(
        &state.db,
        &req.name,
        &email,
        &hash,
        profile_picture.as_deref(),
    )
    .await?;

    let token = JwtKeys::from_ref(state).sign(user.id)?;
    info!(user_id = user.id, email = %user.email, "user registered");
    Ok((user, token))
}

pub async fn login(state: &AppState, req: LoginRequest) -> Result<String, ApiError> {
    let email = req.email.trim().to_lowercase();

    let Some(user) = User::find_by_email(&state.db, &email).await? else {
        warn!(%email, "login with unknown email");
        return Err(ApiError::unauthorized(LOGIN_FAILED));
    };

    if !verify_password(&req.password, &user.password_hash)? {
        warn!(user_id = user.id, "login with invalid password");
        return Err(ApiError::unauthorized(LOGIN_FAILED));
    }

    let token = JwtKeys::from_ref(state).sign(user.id)?;
    info!(user_id = user.id, "user logged in");
    Ok(token)
}

pub async fn update_profile(
    state: &AppState,
    user: User,
    req: UpdateProfileRequest,
) -> Result<User, ApiError> {
    let name = req.name.unwrap_or(user.name);
    // empty string clears the picture, absent leaves it unchanged
    let profile_picture = match req.profile_picture {
        Some(p) if p.is_empty() => None,
        Some(p) => Some(p),
        None => user.profile_picture,
    };

    let updated = User::update_profile(&state.db, user.id, &name, profile_picture.as_deref()).await?;
    info!(user_id = updated.id, "profile updated");
    Ok(updated)
}

/// Backs both forget-password and resend-OTP: issue a fresh code for the
/// email, replacing any earlier one, and hand it to the delivery channel.
pub async fn send_otp(state: &AppState, email: &str) -> Result<String, ApiError> {
    let email = email.trim().to_lowercase();

    if User::find_by_email(&state.db, &email).await?.is_none() {
        warn!(%email, "otp requested for unknown email");
        return Err(ApiError::conflict("User not found with this email"));
    }

    let code = otp::generate_code();
    let record = otp::issue(&state.db, &email, &code, state.config.otp.ttl_minutes).await?;
    state.otp_sender.send_otp(&record.email, &record.code).await?;
    info!(%email, expires_at = %record.expires_at, "otp issued");
    Ok(record.code)
}

pub async fn verify_otp(state: &AppState, req: VerifyOtpRequest) -> Result<(), ApiError> {
    let email = req.email.trim().to_lowercase();

    if !otp::consume(&state.db, &email, &req.otp).await? {
        otp::purge_expired(&state.db, &email).await?;
        warn!(%email, "otp verification rejected");
        return Err(ApiError::conflict("Invalid or expired OTP"));
    }

    let hash = hash_password(&req.new_password)?;
    User::set_password(&state.db, &email, &hash).await?;
    info!(%email, "password reset completed");
    Ok(())
}
