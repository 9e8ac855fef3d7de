use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::checkout::CheckoutProvider;
use crate::services::otp::sessions::OtpSessions;
use crate::services::otp::OtpBackend;

pub struct AppState {
    pub config: AppConfig,
    pub otp_backend: Arc<dyn OtpBackend>,
    pub checkout: Box<dyn CheckoutProvider>,
    pub otp_sessions: OtpSessions,
}
