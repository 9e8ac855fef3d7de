use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{LoginForm, OtpPurpose, PasswordResetForm, RegistrationForm};
use crate::services::account::{self, AccountError};
use crate::services::otp::{OtpOptions, OtpVerification};
use crate::state::AppState;

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpSentResponse {
    pub session_id: Uuid,
    pub email: String,
    pub message: &'static str,
}

// POST /api/auth/login
pub async fn login(Json(form): Json<LoginForm>) -> Result<Json<MessageResponse>, AppError> {
    account::validate_login(&form)?;
    tracing::info!(username = %form.username.trim(), "login (simulated)");
    Ok(Json(MessageResponse {
        message: "Login successful!",
    }))
}

async fn start_verification(
    state: &AppState,
    email: &str,
    purpose: OtpPurpose,
    options: OtpOptions,
) -> Result<(StatusCode, Json<OtpSentResponse>), AppError> {
    if let Err(e) = state.otp_backend.send(email).await {
        tracing::warn!(error = %e, purpose = purpose.as_str(), "failed to send OTP");
        return Err(AccountError::SendFailed.into());
    }

    let widget = OtpVerification::new(email, Arc::clone(&state.otp_backend), options);
    let session_id = state.otp_sessions.open(purpose, widget);

    Ok((
        StatusCode::CREATED,
        Json(OtpSentResponse {
            session_id,
            email: email.to_string(),
            message: "OTP sent to your email successfully!",
        }),
    ))
}

// POST /api/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(form): Json<RegistrationForm>,
) -> Result<(StatusCode, Json<OtpSentResponse>), AppError> {
    let gender = account::validate_registration(&form)?;
    tracing::debug!(username = %form.username.trim(), ?gender, "registration form accepted");

    start_verification(
        &state,
        form.email.trim(),
        OtpPurpose::Registration,
        account::registration_otp_options(),
    )
    .await
}

// POST /api/auth/forgot-password
#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: String,
}

pub async fn forgot_password(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<(StatusCode, Json<OtpSentResponse>), AppError> {
    account::validate_email(&payload.email)?;

    start_verification(
        &state,
        payload.email.trim(),
        OtpPurpose::PasswordReset,
        account::password_reset_otp_options(),
    )
    .await
}

// POST /api/auth/reset-password
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub session_id: Uuid,
    #[serde(flatten)]
    pub form: PasswordResetForm,
}

pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let session = state
        .otp_sessions
        .get(&payload.session_id)
        .filter(|s| s.purpose == OtpPurpose::PasswordReset && s.continued())
        .ok_or(AccountError::ResetNotAuthorized)?;

    account::validate_new_password(&payload.form)?;

    let email = session.widget.lock().await.email().to_string();
    state.otp_sessions.close(&payload.session_id);
    tracing::info!(%email, "password reset (simulated)");

    Ok(Json(MessageResponse {
        message: "Password reset successfully!",
    }))
}
