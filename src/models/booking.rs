use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One offered service, or the synthesized aggregate of several.
///
/// Prices and durations stay in their display form (`"₹300"`, `"30 min"`)
/// because that is what travels between stages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceItem {
    pub name: String,
    pub price: String,
    pub duration: String,
}

impl ServiceItem {
    pub fn new(name: &str, price: &str, duration: &str) -> Self {
        Self {
            name: name.to_string(),
            price: price.to_string(),
            duration: duration.to_string(),
        }
    }
}

/// The establishment a booking is made with. Home-service providers project
/// onto the same shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VenueRef {
    pub name: String,
    pub location: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    Full,
    #[default]
    Advance,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Full => "full",
            PaymentType::Advance => "advance",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    #[serde(rename = "type")]
    pub payment_type: PaymentType,
    pub amount: Decimal,
    pub total_amount: Decimal,
    pub payment_id: String,
    pub order_id: String,
}

/// The forward-passed record of one booking session.
///
/// Each stage receives a draft, checks the fields earlier stages must have
/// filled, and returns a new draft with its own fragment added. Nothing
/// else holds booking state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    pub salon: VenueRef,
    pub selected_services: Vec<ServiceItem>,
    pub selected_service: ServiceItem,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_slot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_details: Option<PaymentDetails>,
}

impl BookingDraft {
    pub fn with_timing(self, date: NaiveDate, slot: String) -> Self {
        Self {
            selected_date: Some(date),
            selected_slot: Some(slot),
            ..self
        }
    }

    pub fn with_payment(self, details: PaymentDetails) -> Self {
        Self {
            payment_details: Some(details),
            ..self
        }
    }

    pub fn has_timing(&self) -> bool {
        self.selected_date.is_some() && self.selected_slot.is_some()
    }
}
