use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::services::account::AccountError;
use crate::services::booking::BookingError;
use crate::services::otp::OtpError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error(transparent)]
    Otp(#[from] OtpError),

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error("not found: {0}")]
    NotFound(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Booking(e) => match e {
                BookingError::GatewayLoading => StatusCode::SERVICE_UNAVAILABLE,
                BookingError::PaymentInProgress => StatusCode::CONFLICT,
                BookingError::PaymentFailed => StatusCode::BAD_GATEWAY,
                _ => StatusCode::UNPROCESSABLE_ENTITY,
            },
            AppError::Otp(e) => match e {
                OtpError::Busy | OtpError::CooldownActive { .. } => StatusCode::CONFLICT,
                OtpError::ResendFailed => StatusCode::BAD_GATEWAY,
                _ => StatusCode::UNPROCESSABLE_ENTITY,
            },
            AppError::Account(e) => match e {
                AccountError::SendFailed => StatusCode::BAD_GATEWAY,
                AccountError::ResetNotAuthorized => StatusCode::FORBIDDEN,
                _ => StatusCode::UNPROCESSABLE_ENTITY,
            },
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
