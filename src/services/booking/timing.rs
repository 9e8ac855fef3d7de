use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::availability::format_time_slot;
use crate::models::{BookingDraft, TimeSlot};

use super::{require_services, BookingError};

pub const FIRST_SLOT_HOUR: u32 = 9;
pub const LAST_SLOT_HOUR: u32 = 21;
/// Share of generated slots that come up free.
pub const AVAILABILITY_RATE: f64 = 0.7;

/// Hourly slots from 09:00 to 21:00 inclusive. Availability is decided once
/// per slot, here, and never re-checked.
pub fn generate_time_slots(mut is_available: impl FnMut(u32) -> bool) -> Vec<TimeSlot> {
    (FIRST_SLOT_HOUR..=LAST_SLOT_HOUR)
        .map(|hour| TimeSlot::on_the_hour(hour, is_available(hour)))
        .collect()
}

pub fn random_time_slots<R: Rng>(rng: &mut R) -> Vec<TimeSlot> {
    generate_time_slots(|_| rng.gen_bool(AVAILABILITY_RATE))
}

/// Slot board for one venue and day. The generator is seeded from both so
/// that listing the board and later submitting against it agree.
///
/// Boards are only reproducible within one build: neither `DefaultHasher`
/// nor `StdRng` promises the same output across Rust or `rand` releases.
pub fn board_for(venue: &str, date: NaiveDate) -> Vec<TimeSlot> {
    let mut hasher = DefaultHasher::new();
    venue.hash(&mut hasher);
    date.hash(&mut hasher);
    let mut rng = StdRng::seed_from_u64(hasher.finish());
    random_time_slots(&mut rng)
}

/// Date and time picker. The date starts at `today`.
#[derive(Debug, Clone)]
pub struct SlotTiming {
    draft: BookingDraft,
    slots: Vec<TimeSlot>,
    today: NaiveDate,
    selected_date: Option<NaiveDate>,
    selected_slot: Option<String>,
}

impl SlotTiming {
    pub fn new(draft: BookingDraft, slots: Vec<TimeSlot>, today: NaiveDate) -> Result<Self, BookingError> {
        require_services(&draft)?;
        Ok(Self {
            draft,
            slots,
            today,
            selected_date: Some(today),
            selected_slot: None,
        })
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn selected_slot(&self) -> Option<&str> {
        self.selected_slot.as_deref()
    }

    pub fn select_date(&mut self, date: NaiveDate) -> Result<(), BookingError> {
        if date < self.today {
            return Err(BookingError::DateInPast(date));
        }
        self.selected_date = Some(date);
        Ok(())
    }

    pub fn clear_date(&mut self) {
        self.selected_date = None;
    }

    pub fn select_slot(&mut self, value: &str) -> Result<(), BookingError> {
        if let Some(date) = self.selected_date {
            if date < self.today {
                return Err(BookingError::DateInPast(date));
            }
        }

        let slot = self
            .slots
            .iter()
            .find(|s| s.value == value)
            .ok_or_else(|| BookingError::UnknownSlot(value.to_string()))?;
        if !slot.available {
            return Err(BookingError::SlotUnavailable(slot.label.clone()));
        }

        self.selected_slot = Some(slot.value.clone());
        Ok(())
    }

    /// e.g. `"October 17th, 2026 at 10:00 AM"`, once both parts are chosen.
    pub fn selection_label(&self) -> Option<String> {
        let date = self.selected_date?;
        let time = format_time_slot(self.selected_slot.as_deref()?)?;
        Some(format!(
            "{} {}{}, {} at {time}",
            date.format("%B"),
            date.day(),
            ordinal_suffix(date.day()),
            date.year()
        ))
    }

    pub fn confirm(&self) -> Result<BookingDraft, BookingError> {
        let date = self.selected_date.ok_or(BookingError::MissingDate)?;
        let slot = self.selected_slot.clone().ok_or(BookingError::MissingSlot)?;
        if date < self.today {
            return Err(BookingError::DateInPast(date));
        }

        tracing::info!(venue = %self.draft.salon.name, %date, slot = %slot, "slot selected");
        Ok(self.draft.clone().with_timing(date, slot))
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ServiceItem, VenueRef};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn draft() -> BookingDraft {
        let package = ServiceItem::new("Full Package", "₹1200", "90 min");
        BookingDraft {
            salon: VenueRef {
                name: "Glamour Studio".to_string(),
                location: "Indiranagar, Bangalore".to_string(),
            },
            selected_services: vec![package.clone()],
            selected_service: package,
            selected_date: None,
            selected_slot: None,
            payment_details: None,
        }
    }

    // 11:00 and 15:00 are booked
    fn stage() -> SlotTiming {
        let slots = generate_time_slots(|hour| hour != 11 && hour != 15);
        SlotTiming::new(draft(), slots, date("2026-10-17")).unwrap()
    }

    #[test]
    fn test_generates_thirteen_hourly_slots() {
        let slots = generate_time_slots(|_| true);
        assert_eq!(slots.len(), 13);
        assert_eq!(slots[0].value, "09:00");
        assert_eq!(slots[3].label, "12:00 PM");
        assert_eq!(slots[12].value, "21:00");
        assert_eq!(slots[12].label, "9:00 PM");
    }

    #[test]
    fn test_board_is_stable_per_venue_and_day() {
        let day = date("2026-10-20");
        assert_eq!(board_for("Glamour Studio", day), board_for("Glamour Studio", day));
        assert_eq!(board_for("Glamour Studio", day).len(), 13);
    }

    #[test]
    fn test_confirm_forwards_date_and_slot() {
        let mut stage = stage();
        stage.select_date(date("2026-10-18")).unwrap();
        stage.select_slot("10:00").unwrap();

        let forwarded = stage.confirm().unwrap();
        assert_eq!(forwarded.selected_date, Some(date("2026-10-18")));
        assert_eq!(forwarded.selected_slot.as_deref(), Some("10:00"));
        assert_eq!(forwarded.selected_service.name, "Full Package");
    }

    #[test]
    fn test_today_is_preselected() {
        let mut stage = stage();
        stage.select_slot("09:00").unwrap();
        assert_eq!(stage.confirm().unwrap().selected_date, Some(date("2026-10-17")));
    }

    #[test]
    fn test_past_date_rejected() {
        let mut stage = stage();
        let err = stage.select_date(date("2026-10-16")).unwrap_err();
        assert_eq!(err, BookingError::DateInPast(date("2026-10-16")));
        assert_eq!(stage.selected_date(), Some(date("2026-10-17")));
    }

    #[test]
    fn test_unavailable_slot_not_selected() {
        let mut stage = stage();
        for booked in ["11:00", "15:00"] {
            let err = stage.select_slot(booked).unwrap_err();
            assert!(matches!(err, BookingError::SlotUnavailable(_)));
            assert!(stage.selected_slot().is_none());
        }
    }

    #[test]
    fn test_unavailable_slot_keeps_previous_choice() {
        let mut stage = stage();
        stage.select_slot("10:00").unwrap();
        assert!(stage.select_slot("11:00").is_err());
        assert_eq!(stage.selected_slot(), Some("10:00"));
    }

    #[test]
    fn test_unknown_slot_rejected() {
        let mut stage = stage();
        assert!(matches!(stage.select_slot("08:00"), Err(BookingError::UnknownSlot(_))));
        assert!(matches!(stage.select_slot("9am"), Err(BookingError::UnknownSlot(_))));
    }

    #[test]
    fn test_missing_date_or_slot_does_not_advance() {
        let mut stage = stage();
        assert_eq!(stage.confirm().unwrap_err(), BookingError::MissingSlot);

        stage.select_slot("13:00").unwrap();
        stage.clear_date();
        assert_eq!(stage.confirm().unwrap_err(), BookingError::MissingDate);
    }

    #[test]
    fn test_empty_draft_rejected() {
        let mut empty = draft();
        empty.selected_services.clear();
        let err = SlotTiming::new(empty, generate_time_slots(|_| true), date("2026-10-17")).unwrap_err();
        assert_eq!(err, BookingError::NoServicesSelected);
    }

    #[test]
    fn test_tampered_aggregate_rejected() {
        let mut tampered = draft();
        tampered.selected_services.push(ServiceItem::new("Hair Spa", "₹800", "60 min"));
        tampered.selected_service = ServiceItem::new("2 Services Selected", "₹1", "150 min");
        let err =
            SlotTiming::new(tampered, generate_time_slots(|_| true), date("2026-10-17")).unwrap_err();
        assert_eq!(err, BookingError::AggregateMismatch);
    }

    #[test]
    fn test_selection_label() {
        let mut stage = stage();
        assert!(stage.selection_label().is_none());
        stage.select_date(date("2026-11-01")).unwrap();
        stage.select_slot("14:00").unwrap();
        assert_eq!(stage.selection_label().as_deref(), Some("November 1st, 2026 at 2:00 PM"));
    }

    #[test]
    fn test_ordinal_suffix() {
        assert_eq!(ordinal_suffix(2), "nd");
        assert_eq!(ordinal_suffix(3), "rd");
        assert_eq!(ordinal_suffix(11), "th");
        assert_eq!(ordinal_suffix(22), "nd");
        assert_eq!(ordinal_suffix(31), "st");
    }
}
