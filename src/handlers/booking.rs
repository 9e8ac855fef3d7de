//! Booking stages over HTTP. The client carries the draft from one call to
//! the next; nothing about a booking is kept server-side.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{BookingDraft, PaymentType, TimeSlot, VenueKind};
use crate::services::booking::timing::board_for;
use crate::services::booking::{
    summarize, BookingError, ConfirmationSummary, PaymentOutcome, PaymentQuote, PaymentStage,
    ServiceSelection, SlotTiming,
};
use crate::services::catalog;
use crate::state::AppState;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

// POST /api/booking/services
#[derive(Deserialize)]
pub struct VenueSelector {
    pub kind: VenueKind,
    pub id: u32,
}

#[derive(Deserialize)]
pub struct ServicesRequest {
    pub venue: VenueSelector,
    #[serde(default)]
    pub services: Vec<String>,
}

pub async fn select_services(
    Json(payload): Json<ServicesRequest>,
) -> Result<Json<BookingDraft>, AppError> {
    let VenueSelector { kind, id } = payload.venue;
    let (venue, menu) = catalog::venue(kind, id)
        .ok_or_else(|| AppError::NotFound(format!("{kind:?} {id}").to_lowercase()))?;

    let mut stage = ServiceSelection::new(venue, menu);
    for name in &payload.services {
        stage.select(name)?;
    }
    Ok(Json(stage.confirm()?))
}

// GET /api/booking/slots
#[derive(Deserialize)]
pub struct SlotsQuery {
    pub salon: String,
    pub date: Option<NaiveDate>,
}

#[derive(Serialize)]
pub struct SlotBoard {
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot>,
}

pub async fn list_slots(Query(query): Query<SlotsQuery>) -> Result<Json<SlotBoard>, AppError> {
    let today = today();
    let date = query.date.unwrap_or(today);
    if date < today {
        return Err(BookingError::DateInPast(date).into());
    }
    Ok(Json(SlotBoard {
        date,
        slots: board_for(&query.salon, date),
    }))
}

// POST /api/booking/timing
#[derive(Deserialize)]
pub struct TimingRequest {
    pub draft: BookingDraft,
    pub date: Option<NaiveDate>,
    pub slot: Option<String>,
}

pub async fn select_timing(
    Json(payload): Json<TimingRequest>,
) -> Result<Json<BookingDraft>, AppError> {
    let today = today();
    let slots = board_for(&payload.draft.salon.name, payload.date.unwrap_or(today));

    let mut stage = SlotTiming::new(payload.draft, slots, today)?;
    match payload.date {
        Some(date) => stage.select_date(date)?,
        None => stage.clear_date(),
    }
    if let Some(slot) = payload.slot.as_deref() {
        stage.select_slot(slot)?;
    }
    Ok(Json(stage.confirm()?))
}

// POST /api/booking/payment/quote
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub draft: BookingDraft,
    #[serde(default)]
    pub payment_type: PaymentType,
}

pub async fn quote_payment(
    Json(payload): Json<PaymentRequest>,
) -> Result<Json<PaymentQuote>, AppError> {
    let mut stage = PaymentStage::new(payload.draft)?;
    stage.select_type(payload.payment_type);
    Ok(Json(stage.quote()))
}

// POST /api/booking/payment
#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PaymentResponse {
    Paid { draft: BookingDraft, message: String },
    Cancelled { message: String },
}

pub async fn pay(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PaymentRequest>,
) -> Result<Json<PaymentResponse>, AppError> {
    let mut stage = PaymentStage::new(payload.draft)?;
    stage.select_type(payload.payment_type);

    let settings = state.config.checkout_settings();
    let response = match stage.pay(state.checkout.as_ref(), &settings).await? {
        PaymentOutcome::Completed(draft) => PaymentResponse::Paid {
            draft,
            message: "Payment successful!".to_string(),
        },
        PaymentOutcome::Cancelled => PaymentResponse::Cancelled {
            message: "Payment cancelled".to_string(),
        },
    };
    Ok(Json(response))
}

// POST /api/booking/confirmation
pub async fn confirmation(
    Json(draft): Json<BookingDraft>,
) -> Result<Json<ConfirmationSummary>, AppError> {
    Ok(Json(summarize(&draft)?))
}
