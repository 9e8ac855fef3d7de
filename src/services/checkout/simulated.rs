use std::time::Duration;

use async_trait::async_trait;

use super::{CheckoutProvider, CheckoutRequest, CheckoutResponse};

/// Stand-in checkout that pays every request after a fixed delay.
pub struct SimulatedCheckout {
    enabled: bool,
    delay: Duration,
}

impl SimulatedCheckout {
    pub fn new(enabled: bool, delay: Duration) -> Self {
        Self { enabled, delay }
    }
}

#[async_trait]
impl CheckoutProvider for SimulatedCheckout {
    fn is_ready(&self) -> bool {
        self.enabled
    }

    async fn open(&self, request: CheckoutRequest) -> anyhow::Result<CheckoutResponse> {
        anyhow::ensure!(self.enabled, "checkout is not loaded");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let payment_id = format!("pay_{}", uuid::Uuid::new_v4().simple());
        tracing::info!(
            order_id = %request.order_id,
            amount = request.amount,
            currency = %request.currency,
            payment_id = %payment_id,
            "simulated checkout paid"
        );

        Ok(CheckoutResponse::Paid {
            payment_id,
            order_id: request.order_id,
        })
    }
}
