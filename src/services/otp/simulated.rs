use std::time::Duration;

use async_trait::async_trait;

use super::{is_complete_code, OtpBackend};

/// Pretend mailer: waits a fixed delay and accepts any six-digit code.
pub struct SimulatedOtpBackend {
    send_delay: Duration,
    delay: Duration,
}

impl SimulatedOtpBackend {
    pub fn new(send_delay: Duration, delay: Duration) -> Self {
        Self { send_delay, delay }
    }
}

#[async_trait]
impl OtpBackend for SimulatedOtpBackend {
    async fn send(&self, email: &str) -> anyhow::Result<()> {
        tokio::time::sleep(self.send_delay).await;
        tracing::info!(email, "OTP sent (simulated)");
        Ok(())
    }

    async fn verify(&self, email: &str, code: &str) -> anyhow::Result<()> {
        tokio::time::sleep(self.delay).await;
        anyhow::ensure!(is_complete_code(code), "invalid OTP for {email}");
        Ok(())
    }

    async fn resend(&self, email: &str) -> anyhow::Result<()> {
        tokio::time::sleep(self.delay).await;
        tracing::info!(email, "OTP resent (simulated)");
        Ok(())
    }
}
