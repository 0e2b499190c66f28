//! Notification configuration handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use pulse_core::{ChannelKind, NotificationChannel, NotificationRule, RuleTrigger};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ChannelsResponse {
    pub items: Vec<NotificationChannel>,
    pub total_count: usize,
}

#[derive(Deserialize)]
pub struct CreateChannelRequest {
    pub id: Option<String>,
    pub name: String,
    pub kind: ChannelKind,
    pub endpoint: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

#[derive(Serialize)]
pub struct RulesResponse {
    pub items: Vec<NotificationRule>,
    pub total_count: usize,
}

#[derive(Deserialize)]
pub struct CreateRuleRequest {
    pub id: Option<String>,
    pub name: String,
    pub channel_id: String,
    pub trigger: RuleTrigger,
    pub threshold: Option<f64>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// GET /apm/v1/notifications/channels
pub async fn list_channels(State(state): State<AppState>) -> Json<ChannelsResponse> {
    let items = state.notifications.list_channels();
    let total_count = items.len();
    Json(ChannelsResponse { items, total_count })
}

/// POST /apm/v1/notifications/channels
pub async fn create_channel(
    State(state): State<AppState>,
    Json(request): Json<CreateChannelRequest>,
) -> Result<(StatusCode, Json<NotificationChannel>), ApiError> {
    if request.endpoint.is_empty() {
        return Err(ApiError::BadRequest(
            "Channel endpoint must not be empty".to_string(),
        ));
    }
    let channel = NotificationChannel {
        id: request
            .id
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        name: request.name,
        kind: request.kind,
        endpoint: request.endpoint,
        enabled: request.enabled,
    };
    let created = state.notifications.create_channel(channel)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /apm/v1/notifications/channels/:channel_id
pub async fn delete_channel(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.notifications.delete_channel(&channel_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /apm/v1/notifications/rules
pub async fn list_rules(State(state): State<AppState>) -> Json<RulesResponse> {
    let items = state.notifications.list_rules();
    let total_count = items.len();
    Json(RulesResponse { items, total_count })
}

/// POST /apm/v1/notifications/rules
pub async fn create_rule(
    State(state): State<AppState>,
    Json(request): Json<CreateRuleRequest>,
) -> Result<(StatusCode, Json<NotificationRule>), ApiError> {
    let rule = NotificationRule {
        id: request
            .id
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        name: request.name,
        channel_id: request.channel_id,
        trigger: request.trigger,
        threshold: request.threshold,
        enabled: request.enabled,
    };
    let created = state.notifications.create_rule(rule)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /apm/v1/notifications/rules/:rule_id
pub async fn delete_rule(
    State(state): State<AppState>,
    Path(rule_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.notifications.delete_rule(&rule_id)?;
    Ok(StatusCode::NO_CONTENT)
}
