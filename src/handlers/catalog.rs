use axum::extract::Path;
use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::{Provider, Salon, ServiceItem};
use crate::services::catalog;

#[derive(Serialize)]
pub struct SalonDetails {
    #[serde(flatten)]
    salon: Salon,
    menu: Vec<ServiceItem>,
}

#[derive(Serialize)]
pub struct ProviderDetails {
    #[serde(flatten)]
    provider: Provider,
    menu: Vec<ServiceItem>,
}

// GET /api/salons
pub async fn list_salons() -> Json<Vec<Salon>> {
    Json(catalog::salons())
}

// GET /api/salons/:id
pub async fn get_salon(Path(id): Path<u32>) -> Result<Json<SalonDetails>, AppError> {
    let salon = catalog::salon(id).ok_or_else(|| AppError::NotFound(format!("salon {id}")))?;
    Ok(Json(SalonDetails {
        salon,
        menu: catalog::salon_menu(),
    }))
}

// GET /api/providers
pub async fn list_providers() -> Json<Vec<Provider>> {
    Json(catalog::providers())
}

// GET /api/providers/:id
pub async fn get_provider(Path(id): Path<u32>) -> Result<Json<ProviderDetails>, AppError> {
    let provider =
        catalog::provider(id).ok_or_else(|| AppError::NotFound(format!("provider {id}")))?;
    Ok(Json(ProviderDetails {
        provider,
        menu: catalog::home_menu(),
    }))
}
