use std::env;
use std::time::Duration;

use crate::services::checkout::{CheckoutSettings, Prefill};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub otp_delay_ms: u64,
    pub otp_send_delay_ms: u64,
    pub checkout_delay_ms: u64,
    pub otp_session_ttl_secs: u64,
    pub checkout_enabled: bool,
    pub merchant_name: String,
    pub currency: String,
    pub prefill_name: String,
    pub prefill_email: String,
    pub prefill_contact: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            otp_delay_ms: env_millis("OTP_DELAY_MS", 1000),
            otp_send_delay_ms: env_millis("OTP_SEND_DELAY_MS", 1500),
            checkout_delay_ms: env_millis("CHECKOUT_DELAY_MS", 0),
            otp_session_ttl_secs: env::var("OTP_SESSION_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(900),
            checkout_enabled: env::var("CHECKOUT_ENABLED")
                .map(|v| !matches!(v.to_lowercase().as_str(), "0" | "false" | "no" | "off"))
                .unwrap_or(true),
            merchant_name: env::var("MERCHANT_NAME").unwrap_or_else(|_| "Salon Sync".to_string()),
            currency: env::var("CURRENCY").unwrap_or_else(|_| "INR".to_string()),
            prefill_name: env::var("PREFILL_NAME").unwrap_or_else(|_| "Customer Name".to_string()),
            prefill_email: env::var("PREFILL_EMAIL")
                .unwrap_or_else(|_| "customer@example.com".to_string()),
            prefill_contact: env::var("PREFILL_CONTACT")
                .unwrap_or_else(|_| "9999999999".to_string()),
        }
    }

    pub fn otp_delay(&self) -> Duration {
        Duration::from_millis(self.otp_delay_ms)
    }

    pub fn otp_send_delay(&self) -> Duration {
        Duration::from_millis(self.otp_send_delay_ms)
    }

    pub fn checkout_delay(&self) -> Duration {
        Duration::from_millis(self.checkout_delay_ms)
    }

    pub fn otp_session_ttl(&self) -> Duration {
        Duration::from_secs(self.otp_session_ttl_secs)
    }

    pub fn checkout_settings(&self) -> CheckoutSettings {
        CheckoutSettings {
            merchant_name: self.merchant_name.clone(),
            currency: self.currency.clone(),
            prefill: Prefill {
                name: self.prefill_name.clone(),
                email: self.prefill_email.clone(),
                contact: self.prefill_contact.clone(),
            },
        }
    }
}

fn env_millis(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
