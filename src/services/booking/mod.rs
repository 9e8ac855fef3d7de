//! The booking stages. Each one takes the draft forwarded by the previous
//! stage and either rejects it or returns it with one more fragment added.

pub mod confirmation;
pub mod payment;
pub mod selection;
pub mod timing;

use chrono::NaiveDate;

use crate::models::BookingDraft;

pub use confirmation::{summarize, ConfirmationSummary};
pub use payment::{PaymentOutcome, PaymentQuote, PaymentStage};
pub use selection::{aggregate, ServiceSelection};
pub use timing::{SlotTiming, FIRST_SLOT_HOUR, LAST_SLOT_HOUR};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum BookingError {
    #[error("Please select at least one service")]
    NoServicesSelected,

    #[error("{0} is not offered here")]
    UnknownService(String),

    #[error("Please select a date")]
    MissingDate,

    #[error("Please select a time slot")]
    MissingSlot,

    #[error("{0} is in the past. Please pick today or a later date")]
    DateInPast(NaiveDate),

    #[error("The {0} slot is already booked")]
    SlotUnavailable(String),

    #[error("{0} is not a bookable time slot")]
    UnknownSlot(String),

    #[error("booking is missing {0}")]
    IncompleteDraft(&'static str),

    #[error("Selected services do not add up to the booking total")]
    AggregateMismatch,

    #[error("The booking total is too large to process")]
    AmountOutOfRange,

    #[error("payment details do not match the {0} payment rules")]
    InconsistentPayment(&'static str),

    #[error("Payment gateway is loading. Please wait a moment and try again.")]
    GatewayLoading,

    #[error("A payment is already in progress")]
    PaymentInProgress,

    #[error("Payment failed. Please try again.")]
    PaymentFailed,
}

/// Checks the fragment the Service Selection Stage is responsible for. The
/// aggregate is recomputed so a forwarded draft cannot carry a total that
/// its services do not add up to.
pub(crate) fn require_services(draft: &BookingDraft) -> Result<(), BookingError> {
    let expected = aggregate(&draft.selected_services)?;
    if expected != draft.selected_service {
        tracing::warn!(
            claimed = %draft.selected_service.price,
            expected = %expected.price,
            "draft aggregate does not match its services"
        );
        return Err(BookingError::AggregateMismatch);
    }
    Ok(())
}

/// Checks the fragments up to and including the Slot Timing Stage.
pub(crate) fn require_timing(draft: &BookingDraft) -> Result<(NaiveDate, &str), BookingError> {
    require_services(draft)?;
    let date = draft.selected_date.ok_or(BookingError::IncompleteDraft("a date"))?;
    let slot = draft
        .selected_slot
        .as_deref()
        .ok_or(BookingError::IncompleteDraft("a time slot"))?;
    Ok((date, slot))
}
