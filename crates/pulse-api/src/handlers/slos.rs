//! SLO configuration and status handlers
//!
//! Definitions are CRUD'd against the backend; derived error-budget
//! values are recomputed per request for the selected time range and
//! never stored.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use pulse_core::{SloMetric, SloRecord};
use pulse_insight::{compute_slo, ComputedSlo, RangeAdjustment, RangeKey};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct SlosResponse {
    pub items: Vec<SloRecord>,
    pub total_count: usize,
}

/// Request body for SLO create/update
#[derive(Deserialize)]
pub struct SloPayload {
    /// Generated when omitted on create
    pub id: Option<String>,
    pub name: String,
    pub metric: SloMetric,
    pub target: f64,
    pub sli_value: f64,
    pub total_minutes: f64,
    pub actual_downtime_minutes: f64,
}

impl SloPayload {
    /// The budget calculator itself is garbage-in/garbage-out, so domain
    /// checks happen here at the API boundary.
    fn validate(&self) -> Result<(), ApiError> {
        if !(self.target > 0.0 && self.target <= 1.0) {
            return Err(ApiError::BadRequest(
                "target must be a fraction in (0, 1]".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.sli_value) {
            return Err(ApiError::BadRequest(
                "sli_value must be a fraction in [0, 1]".to_string(),
            ));
        }
        if !(self.total_minutes > 0.0) {
            return Err(ApiError::BadRequest(
                "total_minutes must be positive".to_string(),
            ));
        }
        if self.actual_downtime_minutes < 0.0 {
            return Err(ApiError::BadRequest(
                "actual_downtime_minutes must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    fn into_record(self, id: String) -> SloRecord {
        SloRecord {
            id,
            name: self.name,
            metric: self.metric,
            target: self.target,
            sli_value: self.sli_value,
            total_minutes: self.total_minutes,
            actual_downtime_minutes: self.actual_downtime_minutes,
        }
    }
}

/// GET /apm/v1/services/:service_id/slos
pub async fn list_slos(
    State(state): State<AppState>,
    Path(service_id): Path<String>,
) -> Result<Json<SlosResponse>, ApiError> {
    let backend = state.get_backend(&service_id)?;
    if !backend.capabilities().slos {
        return Err(ApiError::NotImplemented(
            "This service does not serve SLOs".to_string(),
        ));
    }
    let items = backend.list_slos().await?;
    let total_count = items.len();
    Ok(Json(SlosResponse { items, total_count }))
}

/// POST /apm/v1/services/:service_id/slos
pub async fn create_slo(
    State(state): State<AppState>,
    Path(service_id): Path<String>,
    Json(payload): Json<SloPayload>,
) -> Result<(StatusCode, Json<SloRecord>), ApiError> {
    let backend = state.get_backend(&service_id)?;
    if !backend.capabilities().slo_write {
        return Err(ApiError::NotImplemented(
            "This service does not accept SLO writes".to_string(),
        ));
    }
    payload.validate()?;
    let id = payload
        .id
        .clone()
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let created = backend.create_slo(payload.into_record(id)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /apm/v1/services/:service_id/slos/:slo_id
pub async fn get_slo(
    State(state): State<AppState>,
    Path((service_id, slo_id)): Path<(String, String)>,
) -> Result<Json<SloRecord>, ApiError> {
    let backend = state.get_backend(&service_id)?;
    if !backend.capabilities().slos {
        return Err(ApiError::NotImplemented(
            "This service does not serve SLOs".to_string(),
        ));
    }
    Ok(Json(backend.get_slo(&slo_id).await?))
}

/// PUT /apm/v1/services/:service_id/slos/:slo_id
pub async fn update_slo(
    State(state): State<AppState>,
    Path((service_id, slo_id)): Path<(String, String)>,
    Json(payload): Json<SloPayload>,
) -> Result<Json<SloRecord>, ApiError> {
    let backend = state.get_backend(&service_id)?;
    if !backend.capabilities().slo_write {
        return Err(ApiError::NotImplemented(
            "This service does not accept SLO writes".to_string(),
        ));
    }
    payload.validate()?;
    let updated = backend.update_slo(payload.into_record(slo_id)).await?;
    Ok(Json(updated))
}

/// DELETE /apm/v1/services/:service_id/slos/:slo_id
pub async fn delete_slo(
    State(state): State<AppState>,
    Path((service_id, slo_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let backend = state.get_backend(&service_id)?;
    if !backend.capabilities().slo_write {
        return Err(ApiError::NotImplemented(
            "This service does not accept SLO writes".to_string(),
        ));
    }
    backend.delete_slo(&slo_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct SloStatusQuery {
    #[serde(default = "default_range")]
    pub range: String,
}

fn default_range() -> String {
    "1d".to_string()
}

#[derive(Serialize)]
pub struct SloStatusResponse {
    pub slo: SloRecord,
    pub range: String,
    #[serde(flatten)]
    pub computed: ComputedSlo,
}

/// GET /apm/v1/services/:service_id/slos/:slo_id/status
/// Error-budget status for the selected range
pub async fn get_slo_status(
    State(state): State<AppState>,
    Path((service_id, slo_id)): Path<(String, String)>,
    Query(query): Query<SloStatusQuery>,
) -> Result<Json<SloStatusResponse>, ApiError> {
    let backend = state.get_backend(&service_id)?;
    if !backend.capabilities().slos {
        return Err(ApiError::NotImplemented(
            "This service does not serve SLOs".to_string(),
        ));
    }
    let slo = backend.get_slo(&slo_id).await?;

    let key: RangeKey = query.range.parse()?;
    if !key.is_chart_key() {
        return Err(ApiError::BadRequest(format!(
            "Range {} is too fine for SLO status; use 1h or coarser",
            key
        )));
    }

    let computed = compute_slo(&slo, &RangeAdjustment::for_range(key));
    Ok(Json(SloStatusResponse {
        slo,
        range: key.to_string(),
        computed,
    }))
}
