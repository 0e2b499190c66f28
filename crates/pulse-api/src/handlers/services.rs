//! Service listing handlers

use axum::extract::{Path, State};
use axum::Json;
use pulse_core::{Capabilities, ServiceInfo};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ServicesResponse {
    pub items: Vec<ServiceInfo>,
    pub total_count: usize,
}

#[derive(Serialize)]
pub struct ServiceDetailResponse {
    #[serde(flatten)]
    pub info: ServiceInfo,
    pub capabilities: Capabilities,
}

/// GET /apm/v1/services
/// List all monitored services
pub async fn list_services(State(state): State<AppState>) -> Json<ServicesResponse> {
    let mut items: Vec<ServiceInfo> = state
        .backends()
        .map(|backend| backend.service_info().clone())
        .collect();
    items.sort_by(|a, b| a.id.cmp(&b.id));
    let total_count = items.len();
    Json(ServicesResponse { items, total_count })
}

/// GET /apm/v1/services/:service_id
/// Get one service with its capabilities
pub async fn get_service(
    State(state): State<AppState>,
    Path(service_id): Path<String>,
) -> Result<Json<ServiceDetailResponse>, ApiError> {
    let backend = state.get_backend(&service_id)?;
    Ok(Json(ServiceDetailResponse {
        info: backend.service_info().clone(),
        capabilities: backend.capabilities().clone(),
    }))
}
