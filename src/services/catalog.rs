//! Fixed mock catalog of salons, home-service providers and their menus.

use crate::models::{Provider, Salon, ServiceItem, VenueKind, VenueRef};

pub fn salons() -> Vec<Salon> {
    let salon = |id, name: &str, location: &str, distance: &str, rating, reviews, services: &[&str]| {
        Salon {
            id,
            name: name.to_string(),
            location: location.to_string(),
            distance: distance.to_string(),
            rating,
            reviews,
            services: services.iter().map(|s| s.to_string()).collect(),
        }
    };

    vec![
        salon(1, "Glamour Studio", "Indiranagar, Bangalore", "2.3 km", 4.8, 245, &["Cutting", "Styling", "Spa"]),
        salon(2, "Elite Salon & Spa", "Koramangala, Bangalore", "3.1 km", 4.6, 189, &["Premium Cut", "Color", "Treatment"]),
        salon(3, "Royal Hair Studio", "MG Road, Bangalore", "4.5 km", 4.9, 312, &["Luxury Styling", "Spa", "Bridal"]),
    ]
}

pub fn providers() -> Vec<Provider> {
    let provider = |id: u32, name: &str, location: &str, distance: &str, rating, reviews, services: &[&str], experience: &str| {
        Provider {
            id,
            name: name.to_string(),
            location: location.to_string(),
            distance: distance.to_string(),
            rating,
            reviews,
            services: services.iter().map(|s| s.to_string()).collect(),
            experience: experience.to_string(),
            phone: format!("+91 98765 432{:02}", 9 + id),
            verified: true,
        }
    };

    vec![
        provider(1, "Meera Kumar", "Indiranagar", "2.3 km", 4.9, 156, &["Haircut", "Waxing", "Threading", "Facial", "Massage"], "8 years"),
        provider(2, "Kavita Singh", "Koramangala", "3.1 km", 4.8, 142, &["Bridal Makeup", "Haircut", "Facial", "Manicure", "Pedicure"], "10 years"),
        provider(3, "Deepa Reddy", "HSR Layout", "1.8 km", 4.7, 128, &["Haircut", "Hair Coloring", "Waxing", "Threading"], "6 years"),
        provider(4, "Shalini Menon", "Whitefield", "2.7 km", 4.9, 189, &["Grooming Combo", "Massage", "Facial", "Hair Spa"], "12 years"),
    ]
}

pub fn salon(id: u32) -> Option<Salon> {
    salons().into_iter().find(|s| s.id == id)
}

pub fn provider(id: u32) -> Option<Provider> {
    providers().into_iter().find(|p| p.id == id)
}

/// Menu offered at every salon.
pub fn salon_menu() -> Vec<ServiceItem> {
    vec![
        ServiceItem::new("Classic Haircut", "₹300", "30 min"),
        ServiceItem::new("Premium Styling", "₹500", "45 min"),
        ServiceItem::new("Hair Spa", "₹800", "60 min"),
        ServiceItem::new("Beard Grooming", "₹200", "20 min"),
        ServiceItem::new("Full Package", "₹1200", "90 min"),
    ]
}

/// Menu offered by every home-service provider.
pub fn home_menu() -> Vec<ServiceItem> {
    vec![
        ServiceItem::new("Hair Cutting", "₹499", "45 min"),
        ServiceItem::new("Waxing (Full Body)", "₹899", "60 min"),
        ServiceItem::new("Threading", "₹199", "20 min"),
        ServiceItem::new("Facial", "₹999", "60 min"),
        ServiceItem::new("Massage", "₹1,499", "90 min"),
        ServiceItem::new("Manicure", "₹599", "45 min"),
        ServiceItem::new("Pedicure", "₹699", "45 min"),
        ServiceItem::new("Grooming Combo", "₹2,499", "120 min"),
    ]
}

/// Resolves a venue to the draft's venue shape and the menu it offers.
pub fn venue(kind: VenueKind, id: u32) -> Option<(VenueRef, Vec<ServiceItem>)> {
    match kind {
        VenueKind::Salon => salon(id).map(|s| (VenueRef::from(&s), salon_menu())),
        VenueKind::Provider => provider(id).map(|p| (VenueRef::from(&p), home_menu())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_id() {
        assert_eq!(salon(2).unwrap().name, "Elite Salon & Spa");
        assert_eq!(provider(4).unwrap().name, "Shalini Menon");
        assert!(salon(99).is_none());
        assert!(provider(0).is_none());
    }

    #[test]
    fn test_provider_phones_follow_sequence() {
        let phones: Vec<String> = providers().into_iter().map(|p| p.phone).collect();
        assert_eq!(phones[0], "+91 98765 43210");
        assert_eq!(phones[3], "+91 98765 43213");
    }

    #[test]
    fn test_venue_projection() {
        let (venue_ref, menu) = venue(VenueKind::Salon, 1).unwrap();
        assert_eq!(venue_ref.name, "Glamour Studio");
        assert_eq!(venue_ref.location, "Indiranagar, Bangalore");
        assert_eq!(menu.len(), 5);

        let (venue_ref, menu) = venue(VenueKind::Provider, 3).unwrap();
        assert_eq!(venue_ref.location, "HSR Layout");
        assert_eq!(menu.len(), 8);
    }
}
