//! Simulated sign-in, sign-up and password reset. Nothing is stored; these
//! are the form rules and the OTP texts each flow uses.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Gender, LoginForm, PasswordResetForm, RegistrationForm};
use crate::services::otp::OtpOptions;

pub const MIN_PASSWORD_LEN: usize = 8;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum AccountError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Please enter your email address")]
    MissingEmail,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please choose male, female or other")]
    InvalidGender,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be at least 8 characters long")]
    PasswordTooShort,

    #[error("Password must contain at least one letter and one number")]
    PasswordTooWeak,

    #[error("Failed to send OTP. Please try again.")]
    SendFailed,

    #[error("Verify the OTP sent to your email before resetting your password")]
    ResetNotAuthorized,
}

pub fn validate_email(email: &str) -> Result<(), AccountError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AccountError::MissingEmail);
    }
    if !EMAIL_RE.is_match(email) {
        return Err(AccountError::InvalidEmail);
    }
    Ok(())
}

pub fn validate_login(form: &LoginForm) -> Result<(), AccountError> {
    if form.username.trim().is_empty() || form.password.is_empty() {
        return Err(AccountError::MissingFields);
    }
    Ok(())
}

pub fn validate_registration(form: &RegistrationForm) -> Result<Gender, AccountError> {
    let required = [
        form.username.trim(),
        form.gender.trim(),
        form.location.trim(),
        form.email.trim(),
        form.password.as_str(),
        form.confirm_password.as_str(),
    ];
    if required.iter().any(|f| f.is_empty()) {
        return Err(AccountError::MissingFields);
    }
    if form.password != form.confirm_password {
        return Err(AccountError::PasswordMismatch);
    }
    validate_email(&form.email)?;
    Gender::parse(&form.gender).ok_or(AccountError::InvalidGender)
}

/// New-password rules, checked in the order the reset form reports them.
pub fn validate_new_password(form: &PasswordResetForm) -> Result<(), AccountError> {
    if form.password.is_empty() || form.confirm_password.is_empty() {
        return Err(AccountError::MissingFields);
    }
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AccountError::PasswordTooShort);
    }
    if form.password != form.confirm_password {
        return Err(AccountError::PasswordMismatch);
    }
    let has_digit = form.password.chars().any(|c| c.is_ascii_digit());
    let has_letter = form.password.chars().any(|c| c.is_ascii_alphabetic());
    if !has_digit || !has_letter {
        return Err(AccountError::PasswordTooWeak);
    }
    Ok(())
}

pub fn registration_otp_options() -> OtpOptions {
    OtpOptions {
        title: "Verify Your Email".to_string(),
        description: "Enter the OTP sent to your email to finish creating your account".to_string(),
        continue_label: "Get Started".to_string(),
        ..OtpOptions::default()
    }
}

pub fn password_reset_otp_options() -> OtpOptions {
    OtpOptions {
        title: "Verify OTP for Password Reset".to_string(),
        description: "Enter the OTP sent to your email to reset your password".to_string(),
        verified_message:
            "Your email has been verified successfully! You can now reset your password."
                .to_string(),
        continue_label: "Reset Password".to_string(),
        show_verified_screen: true,
    }
}
