use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{BookingDraft, PaymentDetails, PaymentType};
use crate::services::checkout::{
    CheckoutNotes, CheckoutProvider, CheckoutRequest, CheckoutResponse, CheckoutSettings,
};
use crate::services::pricing::{advance_amount, parse_price, to_minor_units};
use crate::services::transient::Transient;

use super::{require_timing, BookingError};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentQuote {
    pub payment_type: PaymentType,
    pub total_amount: Decimal,
    pub advance_amount: Decimal,
    pub payable_amount: Decimal,
    pub remaining_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    /// Draft forwarded to confirmation, now carrying payment details.
    Completed(BookingDraft),
    /// The customer closed the checkout. The stage stays usable.
    Cancelled,
}

/// Full or advance payment for a timed draft.
#[derive(Debug, Clone)]
pub struct PaymentStage {
    draft: BookingDraft,
    payment_type: PaymentType,
    total_amount: Decimal,
    advance_amount: Decimal,
    processing: bool,
}

impl PaymentStage {
    /// Totals that cannot be charged in minor units are refused here, so
    /// every amount derived later fits.
    pub fn new(draft: BookingDraft) -> Result<Self, BookingError> {
        require_timing(&draft)?;
        let total_amount = parse_price(&draft.selected_service.price);
        to_minor_units(total_amount).ok_or(BookingError::AmountOutOfRange)?;
        let advance_amount = advance_amount(total_amount).ok_or(BookingError::AmountOutOfRange)?;
        Ok(Self {
            draft,
            payment_type: PaymentType::default(),
            total_amount,
            advance_amount,
            processing: false,
        })
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn payment_type(&self) -> PaymentType {
        self.payment_type
    }

    pub fn select_type(&mut self, payment_type: PaymentType) {
        self.payment_type = payment_type;
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    pub fn advance_amount(&self) -> Decimal {
        self.advance_amount
    }

    pub fn payable_amount(&self) -> Decimal {
        match self.payment_type {
            PaymentType::Full => self.total_amount,
            PaymentType::Advance => self.advance_amount(),
        }
    }

    pub fn quote(&self) -> PaymentQuote {
        let payable = self.payable_amount();
        PaymentQuote {
            payment_type: self.payment_type,
            total_amount: self.total_amount,
            advance_amount: self.advance_amount(),
            payable_amount: payable,
            remaining_amount: self.total_amount - payable,
        }
    }

    pub fn checkout_request(
        &self,
        order_id: String,
        settings: &CheckoutSettings,
    ) -> Result<CheckoutRequest, BookingError> {
        let amount =
            to_minor_units(self.payable_amount()).ok_or(BookingError::AmountOutOfRange)?;
        Ok(CheckoutRequest {
            amount,
            currency: settings.currency.clone(),
            name: settings.merchant_name.clone(),
            description: format!("Booking for {}", self.draft.selected_service.name),
            order_id,
            prefill: settings.prefill.clone(),
            notes: CheckoutNotes {
                booking_type: "salon_booking".to_string(),
                service: self.draft.selected_service.name.clone(),
                salon: self.draft.salon.name.clone(),
            },
        })
    }

    /// Hands the payable amount to the checkout and waits for it to close.
    ///
    /// The in-progress flag is cleared on every exit path, including the
    /// future being dropped, so the customer can try again.
    pub async fn pay(
        &mut self,
        checkout: &dyn CheckoutProvider,
        settings: &CheckoutSettings,
    ) -> Result<PaymentOutcome, BookingError> {
        if self.processing {
            return Err(BookingError::PaymentInProgress);
        }
        if !checkout.is_ready() {
            tracing::warn!("checkout not loaded, payment not started");
            return Err(BookingError::GatewayLoading);
        }

        let order_id = format!("order_{}", Utc::now().timestamp_millis());
        let request = self.checkout_request(order_id, settings)?;
        tracing::info!(
            order_id = %request.order_id,
            payment_type = self.payment_type.as_str(),
            amount = request.amount,
            "opening checkout"
        );

        let response = {
            let _processing = Transient::enter(&mut self.processing, true, false);
            checkout.open(request).await
        };

        match response {
            Ok(CheckoutResponse::Paid { payment_id, order_id }) => {
                let details = PaymentDetails {
                    payment_type: self.payment_type,
                    amount: self.payable_amount(),
                    total_amount: self.total_amount,
                    payment_id,
                    order_id,
                };
                tracing::info!(payment_id = %details.payment_id, "payment successful");
                Ok(PaymentOutcome::Completed(self.draft.clone().with_payment(details)))
            }
            Ok(CheckoutResponse::Dismissed) => {
                tracing::info!("payment cancelled");
                Ok(PaymentOutcome::Cancelled)
            }
            Err(e) => {
                tracing::error!(error = %e, "payment failed");
                Err(BookingError::PaymentFailed)
            }
        }
    }
}
