use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, Sse};
use axum::Json;
use serde::{Deserialize, Serialize};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{OtpPhase, OtpPurpose};
use crate::services::otp::sessions::OtpSession;
use crate::services::otp::{OtpError, OtpVerification, ProceedAction, VerifiedScreen};
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpStatus {
    pub id: Uuid,
    pub purpose: OtpPurpose,
    pub email: String,
    pub title: String,
    pub description: String,
    pub phase: OtpPhase,
    pub cooldown_seconds_remaining: u32,
    pub can_resend: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<VerifiedScreen>,
}

fn describe(id: Uuid, purpose: OtpPurpose, widget: &OtpVerification) -> OtpStatus {
    let options = widget.options();
    OtpStatus {
        id,
        purpose,
        email: widget.email().to_string(),
        title: options.title.clone(),
        description: options.description.clone(),
        phase: widget.phase(),
        cooldown_seconds_remaining: widget.cooldown_remaining(),
        can_resend: widget.can_resend(),
        verified: widget.verified_screen(),
    }
}

fn find(state: &AppState, id: &Uuid) -> Result<Arc<OtpSession>, AppError> {
    state
        .otp_sessions
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("OTP session {id}")))
}

// GET /api/otp/:id
pub async fn get_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<OtpStatus>, AppError> {
    let session = find(&state, &id)?;
    let widget = session.widget.lock().await;
    Ok(Json(describe(id, session.purpose, &widget)))
}

// POST /api/otp/:id/verify
#[derive(Deserialize)]
pub struct VerifyRequest {
    pub code: String,
}

pub async fn verify(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<VerifyRequest>,
) -> Result<Json<OtpStatus>, AppError> {
    let session = find(&state, &id)?;
    let mut widget = session.widget.try_lock().map_err(|_| OtpError::Busy)?;

    widget.set_code(&payload.code);
    let result = widget.submit().await;
    if session.is_closed() {
        tracing::debug!(session = %id, "verification finished after teardown, dropping result");
        widget.dispose();
        return Err(AppError::NotFound(format!("OTP session {id}")));
    }
    result?;

    Ok(Json(describe(id, session.purpose, &widget)))
}

// POST /api/otp/:id/resend
pub async fn resend(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<OtpStatus>, AppError> {
    let session = find(&state, &id)?;
    let mut widget = session.widget.try_lock().map_err(|_| OtpError::Busy)?;

    let result = widget.resend().await;
    if session.is_closed() {
        widget.dispose();
        return Err(AppError::NotFound(format!("OTP session {id}")));
    }
    result?;

    Ok(Json(describe(id, session.purpose, &widget)))
}

// POST /api/otp/:id/continue
#[derive(Serialize)]
pub struct ProceedResponse {
    pub next: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

pub async fn proceed(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProceedResponse>, AppError> {
    let session = find(&state, &id)?;
    let action = {
        let widget = session.widget.try_lock().map_err(|_| OtpError::Busy)?;
        widget.proceed()?
    };

    let response = match (action, session.purpose) {
        (ProceedAction::WentBack, _) => {
            state.otp_sessions.close(&id);
            ProceedResponse {
                next: "back",
                message: None,
            }
        }
        (ProceedAction::Continued, OtpPurpose::Registration) => {
            state.otp_sessions.close(&id);
            tracing::info!(session = %id, "account created (simulated)");
            ProceedResponse {
                next: "main",
                message: Some("Account created successfully!"),
            }
        }
        // session stays open until the new password is submitted
        (ProceedAction::Continued, OtpPurpose::PasswordReset) => ProceedResponse {
            next: "reset_password",
            message: None,
        },
    };
    Ok(Json(response))
}

// POST /api/otp/:id/back
pub async fn back(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProceedResponse>, AppError> {
    let session = find(&state, &id)?;
    {
        let widget = session.widget.try_lock().map_err(|_| OtpError::Busy)?;
        widget.back()?;
    }
    state.otp_sessions.close(&id);
    Ok(Json(ProceedResponse {
        next: "back",
        message: None,
    }))
}

// DELETE /api/otp/:id
pub async fn close(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.otp_sessions.close(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("OTP session {id}")))
    }
}

// GET /api/otp/:id/events
pub async fn events(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>>, AppError> {
    let session = find(&state, &id)?;
    let (current, rx) = {
        let widget = session.widget.lock().await;
        (widget.cooldown_remaining(), widget.subscribe_cooldown())
    };

    // `None` marks the end of the live ticks; the stream stops there
    // instead of running on keepalives alone.
    let initial = tokio_stream::once(Some(Ok::<_, Infallible>(cooldown_event(current))));
    let live = BroadcastStream::new(rx)
        .filter_map(|result| match result {
            Ok(remaining) => Some(Some(Ok(cooldown_event(remaining)))),
            Err(tokio_stream::wrappers::errors::BroadcastStreamRecvError::Lagged(_)) => None,
        })
        .chain(tokio_stream::once(None));

    let keepalive = tokio_stream::StreamExt::map(
        tokio_stream::wrappers::IntervalStream::new(tokio::time::interval(Duration::from_secs(30))),
        |_| Some(Ok(Event::default().comment("keepalive"))),
    );

    let merged = StreamExt::merge(initial.chain(live), keepalive)
        .take_while(Option::is_some)
        .filter_map(|event| event);

    Ok(Sse::new(merged))
}

fn cooldown_event(remaining: u32) -> Event {
    Event::default()
        .event("cooldown")
        .data(remaining.to_string())
}
