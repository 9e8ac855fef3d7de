pub mod cooldown;
pub mod sessions;
pub mod simulated;
pub mod widget;

use async_trait::async_trait;

pub use cooldown::Cooldown;
pub use widget::{OtpOptions, OtpVerification, ProceedAction, VerifiedScreen};

pub const CODE_LENGTH: usize = 6;
pub const RESEND_COOLDOWN_SECS: u32 = 60;

/// Sends and checks one-time codes for an email address. Supplied by the
/// account flow that hosts the verification widget.
#[async_trait]
pub trait OtpBackend: Send + Sync {
    async fn send(&self, email: &str) -> anyhow::Result<()>;
    async fn verify(&self, email: &str, code: &str) -> anyhow::Result<()>;
    async fn resend(&self, email: &str) -> anyhow::Result<()>;
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum OtpError {
    #[error("Please enter the complete 6-digit OTP")]
    IncompleteCode,

    #[error("Invalid OTP. Please try again.")]
    InvalidCode,

    #[error("Resend available in {remaining}s")]
    CooldownActive { remaining: u32 },

    #[error("Failed to resend OTP. Please try again.")]
    ResendFailed,

    #[error("OTP already verified")]
    AlreadyVerified,

    #[error("OTP has not been verified yet")]
    NotVerified,

    #[error("no follow-up action is configured")]
    NoAction,

    #[error("Another OTP request is still in progress")]
    Busy,
}

pub fn is_complete_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.chars().all(|c| c.is_ascii_digit())
}
