use crate::models::{BookingDraft, ServiceItem, VenueRef};
use crate::services::pricing::{format_duration, format_price, parse_duration_minutes, sum_prices};

use super::BookingError;

/// Combines the chosen services into the single line item later stages
/// display and charge for.
///
/// Durations are summed as if the services ran back to back. A lone service
/// is carried through unchanged.
pub fn aggregate(services: &[ServiceItem]) -> Result<ServiceItem, BookingError> {
    match services {
        [] => Err(BookingError::NoServicesSelected),
        [only] => Ok(only.clone()),
        many => {
            let price = sum_prices(many.iter().map(|s| s.price.as_str()))
                .ok_or(BookingError::AmountOutOfRange)?;
            let minutes = many
                .iter()
                .try_fold(0u32, |total, s| total.checked_add(parse_duration_minutes(&s.duration)))
                .ok_or(BookingError::AmountOutOfRange)?;
            Ok(ServiceItem {
                name: format!("{} Services Selected", many.len()),
                price: format_price(price),
                duration: format_duration(minutes),
            })
        }
    }
}

/// Multi-select over a venue's menu. Selections keep the order in which
/// they were picked.
#[derive(Debug, Clone)]
pub struct ServiceSelection {
    venue: VenueRef,
    menu: Vec<ServiceItem>,
    picked: Vec<usize>,
}

impl ServiceSelection {
    pub fn new(venue: VenueRef, menu: Vec<ServiceItem>) -> Self {
        Self {
            venue,
            menu,
            picked: Vec::new(),
        }
    }

    pub fn menu(&self) -> &[ServiceItem] {
        &self.menu
    }

    fn position(&self, name: &str) -> Result<usize, BookingError> {
        self.menu
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| BookingError::UnknownService(name.to_string()))
    }

    /// Flips one service in or out. Returns whether it is now selected.
    pub fn toggle(&mut self, name: &str) -> Result<bool, BookingError> {
        let idx = self.position(name)?;
        if let Some(at) = self.picked.iter().position(|&i| i == idx) {
            self.picked.remove(at);
            Ok(false)
        } else {
            self.picked.push(idx);
            Ok(true)
        }
    }

    /// Adds a service if it is not already selected.
    pub fn select(&mut self, name: &str) -> Result<(), BookingError> {
        let idx = self.position(name)?;
        if !self.picked.contains(&idx) {
            self.picked.push(idx);
        }
        Ok(())
    }

    pub fn selected(&self) -> Vec<ServiceItem> {
        self.picked.iter().map(|&i| self.menu[i].clone()).collect()
    }

    /// Running total shown while the user is still choosing.
    pub fn summary(&self) -> Option<ServiceItem> {
        aggregate(&self.selected()).ok()
    }

    pub fn confirm(&self) -> Result<BookingDraft, BookingError> {
        let selected = self.selected();
        let aggregate = aggregate(&selected)?;

        tracing::info!(
            venue = %self.venue.name,
            count = selected.len(),
            total = %aggregate.price,
            "services selected"
        );

        Ok(BookingDraft {
            salon: self.venue.clone(),
            selected_services: selected,
            selected_service: aggregate,
            selected_date: None,
            selected_slot: None,
            payment_details: None,
        })
    }
}
