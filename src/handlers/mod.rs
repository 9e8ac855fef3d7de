pub mod auth;
pub mod booking;
pub mod catalog;
pub mod health;
pub mod otp;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/salons", get(catalog::list_salons))
        .route("/api/salons/:id", get(catalog::get_salon))
        .route("/api/providers", get(catalog::list_providers))
        .route("/api/providers/:id", get(catalog::get_provider))
        .route("/api/booking/services", post(booking::select_services))
        .route("/api/booking/slots", get(booking::list_slots))
        .route("/api/booking/timing", post(booking::select_timing))
        .route("/api/booking/payment/quote", post(booking::quote_payment))
        .route("/api/booking/payment", post(booking::pay))
        .route("/api/booking/confirmation", post(booking::confirmation))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/forgot-password", post(auth::forgot_password))
        .route("/api/auth/reset-password", post(auth::reset_password))
        .route("/api/otp/:id", get(otp::get_status).delete(otp::close))
        .route("/api/otp/:id/verify", post(otp::verify))
        .route("/api/otp/:id/resend", post(otp::resend))
        .route("/api/otp/:id/continue", post(otp::proceed))
        .route("/api/otp/:id/back", post(otp::back))
        .route("/api/otp/:id/events", get(otp::events))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
