use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use salon_sync::config::AppConfig;
use salon_sync::handlers;
use salon_sync::services::checkout::simulated::SimulatedCheckout;
use salon_sync::services::otp::sessions::OtpSessions;
use salon_sync::services::otp::simulated::SimulatedOtpBackend;
use salon_sync::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let otp_backend = SimulatedOtpBackend::new(config.otp_send_delay(), config.otp_delay());
    tracing::info!(
        "using simulated OTP backend (send {}ms, verify {}ms)",
        config.otp_send_delay_ms,
        config.otp_delay_ms
    );

    let checkout = SimulatedCheckout::new(config.checkout_enabled, config.checkout_delay());
    if !config.checkout_enabled {
        tracing::warn!("checkout gateway disabled; payments will report the gateway as loading");
    }

    let state = Arc::new(AppState {
        config: config.clone(),
        otp_backend: Arc::new(otp_backend),
        checkout: Box::new(checkout),
        otp_sessions: OtpSessions::with_ttl(config.otp_session_ttl()),
    });

    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
