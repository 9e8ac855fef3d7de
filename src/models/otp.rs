use serde::{Deserialize, Serialize};

/// Where an OTP verification widget is in its lifecycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OtpPhase {
    Entering,
    Verifying,
    Verified,
}

impl OtpPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpPhase::Entering => "entering",
            OtpPhase::Verifying => "verifying",
            OtpPhase::Verified => "verified",
        }
    }
}

/// Which account flow opened a verification session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OtpPurpose {
    Registration,
    PasswordReset,
}

impl OtpPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpPurpose::Registration => "registration",
            OtpPurpose::PasswordReset => "password_reset",
        }
    }
}
