use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::availability::format_time_slot;
use crate::models::{BookingDraft, PaymentDetails, PaymentType, ServiceItem, VenueRef};
use crate::services::pricing::{advance_amount, format_price, parse_price};

use super::{require_timing, BookingError};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    pub payment_type: PaymentType,
    pub paid: String,
    pub total: String,
    pub payment_id: String,
    pub remaining: Decimal,
}

/// Display-ready projection of a finished draft.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationSummary {
    pub venue: VenueRef,
    pub service_heading: String,
    pub services: Vec<ServiceItem>,
    pub total_duration: String,
    pub total_price: String,
    pub date: String,
    pub time: String,
    pub payment: PaymentSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance_note: Option<String>,
}

/// Balance still owed at the venue.
pub fn remaining_balance(details: &PaymentDetails) -> Decimal {
    details.total_amount - details.amount
}

fn check_payment(draft: &BookingDraft, details: &PaymentDetails) -> Result<(), BookingError> {
    if details.total_amount != parse_price(&draft.selected_service.price) {
        return Err(BookingError::InconsistentPayment(details.payment_type.as_str()));
    }
    let expected = match details.payment_type {
        PaymentType::Full => details.total_amount,
        PaymentType::Advance => {
            advance_amount(details.total_amount).ok_or(BookingError::AmountOutOfRange)?
        }
    };
    if details.amount != expected {
        return Err(BookingError::InconsistentPayment(details.payment_type.as_str()));
    }
    Ok(())
}

/// Renders the confirmation screen from a draft without touching it.
pub fn summarize(draft: &BookingDraft) -> Result<ConfirmationSummary, BookingError> {
    let (date, slot) = require_timing(draft)?;
    let time = format_time_slot(slot).ok_or_else(|| BookingError::UnknownSlot(slot.to_string()))?;

    let details = draft
        .payment_details
        .as_ref()
        .ok_or(BookingError::IncompleteDraft("payment details"))?;
    check_payment(draft, details)?;

    let payment = PaymentSummary {
        payment_type: details.payment_type,
        paid: format_price(details.amount),
        total: format_price(details.total_amount),
        payment_id: details.payment_id.clone(),
        remaining: remaining_balance(details),
    };

    let balance_note = (payment.payment_type == PaymentType::Advance).then(|| {
        format!(
            "You've paid the advance amount. Please pay the remaining {} at the salon when you arrive for your service.",
            format_price(payment.remaining)
        )
    });

    let heading = if draft.selected_services.len() > 1 {
        "Services"
    } else {
        "Service"
    };

    Ok(ConfirmationSummary {
        venue: draft.salon.clone(),
        service_heading: heading.to_string(),
        services: draft.selected_services.clone(),
        total_duration: draft.selected_service.duration.clone(),
        total_price: draft.selected_service.price.clone(),
        date: date.format("%A, %B %d, %Y").to_string(),
        time,
        payment,
        balance_note,
    })
}
