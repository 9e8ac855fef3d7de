use std::sync::Arc;

use serde::Serialize;
use tokio::sync::broadcast;

use crate::models::OtpPhase;
use crate::services::transient::Transient;

use super::{is_complete_code, Cooldown, OtpBackend, OtpError, CODE_LENGTH, RESEND_COOLDOWN_SECS};

pub type Callback = Box<dyn Fn() + Send + Sync>;

/// Texts shown by the widget and whether it ends on a verified screen.
#[derive(Debug, Clone)]
pub struct OtpOptions {
    pub title: String,
    pub description: String,
    pub verified_message: String,
    pub continue_label: String,
    pub show_verified_screen: bool,
}

impl Default for OtpOptions {
    fn default() -> Self {
        Self {
            title: "Verify OTP".to_string(),
            description: "Enter the OTP sent to your email".to_string(),
            verified_message: "Your email has been verified successfully!".to_string(),
            continue_label: "Continue".to_string(),
            show_verified_screen: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedScreen {
    pub heading: String,
    pub message: String,
    pub email: String,
    /// Label of the single button offered, if any.
    pub action: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProceedAction {
    Continued,
    WentBack,
}

/// Six-digit code entry with a resend cooldown.
///
/// Verification and resend are delegated to the backend; the widget only
/// tracks the entered code, the phase and the cooldown.
pub struct OtpVerification {
    email: String,
    code: String,
    phase: OtpPhase,
    resending: bool,
    options: OtpOptions,
    backend: Arc<dyn OtpBackend>,
    cooldown: Cooldown,
    on_continue: Option<Callback>,
    on_back: Option<Callback>,
}

impl OtpVerification {
    pub fn new(email: impl Into<String>, backend: Arc<dyn OtpBackend>, options: OtpOptions) -> Self {
        Self {
            email: email.into(),
            code: String::new(),
            phase: OtpPhase::Entering,
            resending: false,
            options,
            backend,
            cooldown: Cooldown::new(),
            on_continue: None,
            on_back: None,
        }
    }

    pub fn on_continue(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_continue = Some(Box::new(f));
        self
    }

    pub fn on_back(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_back = Some(Box::new(f));
        self
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn phase(&self) -> OtpPhase {
        self.phase
    }

    pub fn options(&self) -> &OtpOptions {
        &self.options
    }

    pub fn is_busy(&self) -> bool {
        self.phase == OtpPhase::Verifying || self.resending
    }

    /// Replaces the entered code. Non-digits are dropped and input stops at
    /// six digits, like the segmented input it stands for.
    pub fn set_code(&mut self, input: &str) {
        if self.phase != OtpPhase::Entering {
            return;
        }
        self.code = input
            .chars()
            .filter(|c| c.is_ascii_digit())
            .take(CODE_LENGTH)
            .collect();
    }

    pub fn cooldown_remaining(&self) -> u32 {
        self.cooldown.remaining()
    }

    pub fn can_resend(&self) -> bool {
        self.phase == OtpPhase::Entering && !self.resending && !self.cooldown.is_active()
    }

    pub fn subscribe_cooldown(&self) -> broadcast::Receiver<u32> {
        self.cooldown.subscribe()
    }

    /// Submits the entered code. Incomplete codes never reach the backend;
    /// a rejected code is cleared so it has to be typed again.
    pub async fn submit(&mut self) -> Result<(), OtpError> {
        match self.phase {
            OtpPhase::Verified => return Err(OtpError::AlreadyVerified),
            OtpPhase::Verifying => return Err(OtpError::Busy),
            OtpPhase::Entering => {}
        }
        if self.resending {
            return Err(OtpError::Busy);
        }
        if !is_complete_code(&self.code) {
            return Err(OtpError::IncompleteCode);
        }

        // back to Entering if this future is dropped mid-check
        let result = {
            let verifying =
                Transient::enter(&mut self.phase, OtpPhase::Verifying, OtpPhase::Entering);
            let result = self.backend.verify(&self.email, &self.code).await;
            if result.is_ok() {
                verifying.finish(OtpPhase::Verified);
            }
            result
        };

        match result {
            Ok(()) => {
                self.cooldown.cancel();
                tracing::info!(email = %self.email, "OTP verified");
                Ok(())
            }
            Err(e) => {
                self.code.clear();
                tracing::warn!(email = %self.email, error = %e, "OTP rejected");
                Err(OtpError::InvalidCode)
            }
        }
    }

    /// Asks the backend for a fresh code. Refused without calling the
    /// backend while the cooldown is running.
    pub async fn resend(&mut self) -> Result<(), OtpError> {
        match self.phase {
            OtpPhase::Verified => return Err(OtpError::AlreadyVerified),
            OtpPhase::Verifying => return Err(OtpError::Busy),
            OtpPhase::Entering => {}
        }
        let remaining = self.cooldown.remaining();
        if remaining > 0 {
            return Err(OtpError::CooldownActive { remaining });
        }
        if self.resending {
            return Err(OtpError::Busy);
        }

        let result = {
            let _resending = Transient::enter(&mut self.resending, true, false);
            self.backend.resend(&self.email).await
        };

        match result {
            Ok(()) => {
                self.cooldown.start(RESEND_COOLDOWN_SECS);
                self.code.clear();
                tracing::info!(email = %self.email, "OTP resent");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(email = %self.email, error = %e, "OTP resend failed");
                Err(OtpError::ResendFailed)
            }
        }
    }

    /// The terminal screen, when verified and the host asked for one.
    pub fn verified_screen(&self) -> Option<VerifiedScreen> {
        if self.phase != OtpPhase::Verified || !self.options.show_verified_screen {
            return None;
        }
        let action = if self.on_continue.is_some() {
            Some(self.options.continue_label.clone())
        } else if self.on_back.is_some() {
            Some("Back".to_string())
        } else {
            None
        };
        Some(VerifiedScreen {
            heading: "OTP Verified!".to_string(),
            message: self.options.verified_message.clone(),
            email: self.email.clone(),
            action,
        })
    }

    /// The verified screen's button: continue if the host supplied a
    /// continuation, otherwise back.
    pub fn proceed(&self) -> Result<ProceedAction, OtpError> {
        if self.phase != OtpPhase::Verified {
            return Err(OtpError::NotVerified);
        }
        if let Some(f) = &self.on_continue {
            f();
            return Ok(ProceedAction::Continued);
        }
        if let Some(f) = &self.on_back {
            f();
            return Ok(ProceedAction::WentBack);
        }
        Err(OtpError::NoAction)
    }

    /// Back link on the entry form. Disabled while a check is in flight.
    pub fn back(&self) -> Result<(), OtpError> {
        if self.phase == OtpPhase::Verifying {
            return Err(OtpError::Busy);
        }
        let f = self.on_back.as_ref().ok_or(OtpError::NoAction)?;
        f();
        Ok(())
    }

    /// Stops the cooldown timer. Dropping the widget does the same.
    pub fn dispose(&mut self) {
        self.cooldown.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    #[derive(Default)]
    struct FakeBackend {
        reject: AtomicBool,
        fail_resend: AtomicBool,
        stall: AtomicBool,
        verify_calls: AtomicUsize,
        resend_calls: AtomicUsize,
    }

    #[async_trait]
    impl OtpBackend for FakeBackend {
        async fn send(&self, _email: &str) -> anyhow::Result<()> {
            Ok(())
        }

        async fn verify(&self, _email: &str, _code: &str) -> anyhow::Result<()> {
            self.verify_calls.fetch_add(1, Ordering::SeqCst);
            if self.stall.load(Ordering::SeqCst) {
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
            if self.reject.load(Ordering::SeqCst) {
                anyhow::bail!("code mismatch");
            }
            Ok(())
        }

        async fn resend(&self, _email: &str) -> anyhow::Result<()> {
            self.resend_calls.fetch_add(1, Ordering::SeqCst);
            if self.stall.load(Ordering::SeqCst) {
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
            if self.fail_resend.load(Ordering::SeqCst) {
                anyhow::bail!("mailer down");
            }
            Ok(())
        }
    }

    fn widget(backend: &Arc<FakeBackend>) -> OtpVerification {
        let backend: Arc<dyn OtpBackend> = backend.clone();
        OtpVerification::new("user@example.com", backend, OtpOptions::default())
    }

    #[tokio::test]
    async fn test_short_code_never_reaches_backend() {
        let backend = Arc::new(FakeBackend::default());
        let mut otp = widget(&backend);
        otp.set_code("1234");

        assert_eq!(otp.submit().await.unwrap_err(), OtpError::IncompleteCode);
        assert_eq!(backend.verify_calls.load(Ordering::SeqCst), 0);
        assert_eq!(otp.phase(), OtpPhase::Entering);
        assert_eq!(otp.code(), "1234");
    }

    #[tokio::test]
    async fn test_valid_code_verifies() {
        let backend = Arc::new(FakeBackend::default());
        let mut otp = widget(&backend);
        otp.set_code("123456");

        otp.submit().await.unwrap();
        assert_eq!(otp.phase(), OtpPhase::Verified);
        assert_eq!(backend.verify_calls.load(Ordering::SeqCst), 1);
        assert_eq!(otp.submit().await.unwrap_err(), OtpError::AlreadyVerified);
    }

    #[tokio::test]
    async fn test_rejected_code_returns_to_entering_and_clears() {
        let backend = Arc::new(FakeBackend::default());
        backend.reject.store(true, Ordering::SeqCst);
        let mut otp = widget(&backend);
        otp.set_code("654321");

        assert_eq!(otp.submit().await.unwrap_err(), OtpError::InvalidCode);
        assert_eq!(otp.phase(), OtpPhase::Entering);
        assert_eq!(otp.code(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_verify_returns_to_entering() {
        let backend = Arc::new(FakeBackend::default());
        backend.stall.store(true, Ordering::SeqCst);
        let mut otp = widget(&backend);
        otp.set_code("123456");

        let abandoned = tokio::time::timeout(Duration::from_secs(1), otp.submit()).await;
        assert!(abandoned.is_err());
        assert_eq!(otp.phase(), OtpPhase::Entering);
        assert!(!otp.is_busy());

        backend.stall.store(false, Ordering::SeqCst);
        otp.submit().await.unwrap();
        assert_eq!(otp.phase(), OtpPhase::Verified);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_resend_clears_busy() {
        let backend = Arc::new(FakeBackend::default());
        backend.stall.store(true, Ordering::SeqCst);
        let mut otp = widget(&backend);

        let abandoned = tokio::time::timeout(Duration::from_secs(1), otp.resend()).await;
        assert!(abandoned.is_err());
        assert!(!otp.is_busy());
        assert!(otp.can_resend());

        backend.stall.store(false, Ordering::SeqCst);
        otp.resend().await.unwrap();
        assert_eq!(otp.cooldown_remaining(), 60);
    }

    #[test]
    fn test_set_code_keeps_six_digits() {
        let backend: Arc<dyn OtpBackend> = Arc::new(FakeBackend::default());
        let mut otp = OtpVerification::new("user@example.com", backend, OtpOptions::default());
        otp.set_code("12-34 5678");
        assert_eq!(otp.code(), "123456");
    }

    #[tokio::test(start_paused = true)]
    async fn test_resend_starts_sixty_second_cooldown() {
        let backend = Arc::new(FakeBackend::default());
        let mut otp = widget(&backend);
        otp.set_code("12");
        assert!(otp.can_resend());

        otp.resend().await.unwrap();
        assert_eq!(otp.cooldown_remaining(), 60);
        assert_eq!(otp.code(), "");
        assert!(!otp.can_resend());

        let err = otp.resend().await.unwrap_err();
        assert_eq!(err, OtpError::CooldownActive { remaining: 60 });
        assert_eq!(backend.resend_calls.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_millis(10_500)).await;
        assert_eq!(otp.cooldown_remaining(), 50);

        tokio::time::sleep(Duration::from_secs(50)).await;
        assert_eq!(otp.cooldown_remaining(), 0);
        otp.resend().await.unwrap();
        assert_eq!(backend.resend_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_resend_keeps_code_and_no_cooldown() {
        let backend = Arc::new(FakeBackend::default());
        backend.fail_resend.store(true, Ordering::SeqCst);
        let mut otp = widget(&backend);
        otp.set_code("111");

        assert_eq!(otp.resend().await.unwrap_err(), OtpError::ResendFailed);
        assert_eq!(otp.cooldown_remaining(), 0);
        assert_eq!(otp.code(), "111");
        assert!(otp.can_resend());
    }

    #[tokio::test]
    async fn test_verified_screen_offers_continue() {
        let backend = Arc::new(FakeBackend::default());
        let continued = Arc::new(AtomicBool::new(false));
        let flag = continued.clone();
        let options = OtpOptions {
            continue_label: "Reset Password".to_string(),
            ..OtpOptions::default()
        };
        let backend_dyn: Arc<dyn OtpBackend> = backend.clone();
        let mut otp = OtpVerification::new("user@example.com", backend_dyn, options)
            .on_continue(move || flag.store(true, Ordering::SeqCst))
            .on_back(|| {});

        assert!(otp.verified_screen().is_none());
        assert_eq!(otp.proceed().unwrap_err(), OtpError::NotVerified);

        otp.set_code("000000");
        otp.submit().await.unwrap();

        let screen = otp.verified_screen().unwrap();
        assert_eq!(screen.heading, "OTP Verified!");
        assert_eq!(screen.action.as_deref(), Some("Reset Password"));
        assert_eq!(otp.proceed().unwrap(), ProceedAction::Continued);
        assert!(continued.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_verified_screen_falls_back_to_back() {
        let backend = Arc::new(FakeBackend::default());
        let went_back = Arc::new(AtomicBool::new(false));
        let flag = went_back.clone();
        let mut otp = widget(&backend).on_back(move || flag.store(true, Ordering::SeqCst));

        otp.set_code("000000");
        otp.submit().await.unwrap();

        assert_eq!(otp.verified_screen().unwrap().action.as_deref(), Some("Back"));
        assert_eq!(otp.proceed().unwrap(), ProceedAction::WentBack);
        assert!(went_back.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_verified_screen_can_be_suppressed() {
        let backend = Arc::new(FakeBackend::default());
        let options = OtpOptions {
            show_verified_screen: false,
            ..OtpOptions::default()
        };
        let backend_dyn: Arc<dyn OtpBackend> = backend.clone();
        let mut otp = OtpVerification::new("user@example.com", backend_dyn, options);
        otp.set_code("000000");
        otp.submit().await.unwrap();

        assert_eq!(otp.phase(), OtpPhase::Verified);
        assert!(otp.verified_screen().is_none());
        assert_eq!(otp.proceed().unwrap_err(), OtpError::NoAction);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispose_stops_cooldown() {
        let backend = Arc::new(FakeBackend::default());
        let mut otp = widget(&backend);
        otp.resend().await.unwrap();
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(otp.cooldown_remaining(), 59);

        otp.dispose();
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(otp.cooldown_remaining(), 59);
    }
}
