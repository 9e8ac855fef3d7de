use serde::{Deserialize, Serialize};

use super::booking::VenueRef;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VenueKind {
    Salon,
    Provider,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Salon {
    pub id: u32,
    pub name: String,
    pub location: String,
    pub distance: String,
    pub rating: f32,
    pub reviews: u32,
    pub services: Vec<String>,
}

/// A home-service professional who visits the customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    pub id: u32,
    pub name: String,
    pub location: String,
    pub distance: String,
    pub rating: f32,
    pub reviews: u32,
    pub services: Vec<String>,
    pub experience: String,
    pub phone: String,
    pub verified: bool,
}

impl From<&Salon> for VenueRef {
    fn from(salon: &Salon) -> Self {
        VenueRef {
            name: salon.name.clone(),
            location: salon.location.clone(),
        }
    }
}

impl From<&Provider> for VenueRef {
    fn from(provider: &Provider) -> Self {
        VenueRef {
            name: provider.name.clone(),
            location: provider.location.clone(),
        }
    }
}
