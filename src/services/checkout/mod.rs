pub mod simulated;

use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Prefill {
    pub name: String,
    pub email: String,
    pub contact: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CheckoutNotes {
    pub booking_type: String,
    pub service: String,
    pub salon: String,
}

/// What the hosted checkout is opened with.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Minor currency units.
    pub amount: i64,
    pub currency: String,
    pub name: String,
    pub description: String,
    pub order_id: String,
    pub prefill: Prefill,
    pub notes: CheckoutNotes,
}

/// How the checkout session ended. `Paid` stands in for the provider's
/// success handler and `Dismissed` for its dismiss handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutResponse {
    Paid { payment_id: String, order_id: String },
    Dismissed,
}

/// Merchant-level inputs to every checkout request.
#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    pub merchant_name: String,
    pub currency: String,
    pub prefill: Prefill,
}

/// External payment collection. Not reimplemented here; the booking flow
/// only needs to know whether it is loaded and how a session ended.
#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    fn is_ready(&self) -> bool;
    async fn open(&self, request: CheckoutRequest) -> anyhow::Result<CheckoutResponse>;
}
