//! Notification preference endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use persistence::repositories::PreferenceRepository;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::preference::{
    PreferenceQuery, PreferenceResponse, TogglePreferenceQuery, UpsertPreferenceRequest,
};
use domain::services::PreferenceService;

fn preference_service(state: &AppState) -> PreferenceService {
    PreferenceService::new(Arc::new(PreferenceRepository::new(state.pool.clone())))
}

/// Create or replace a user's notification preference.
///
/// POST /api/v1/notifications/preferences
pub async fn upsert_preference(
    State(state): State<AppState>,
    Json(request): Json<UpsertPreferenceRequest>,
) -> Result<(StatusCode, Json<PreferenceResponse>), ApiError> {
    request.validate()?;

    let preference = preference_service(&state)
        .upsert(
            request.user_id,
            request.notification_enabled,
            request.contact_info.unwrap_or_default(),
        )
        .await?;

    info!(
        user_id = %preference.user_id,
        enabled = preference.enabled,
        "Notification preference upserted"
    );

    Ok((StatusCode::CREATED, Json(preference.into())))
}

/// Fetch a user's preference, creating the default when none exists.
///
/// GET /api/v1/notifications/preferences?userId=<uuid>
pub async fn get_preference(
    State(state): State<AppState>,
    Query(query): Query<PreferenceQuery>,
) -> Result<Json<PreferenceResponse>, ApiError> {
    let preference = preference_service(&state)
        .get_or_create(query.user_id)
        .await?;

    Ok(Json(preference.into()))
}

/// Toggle only the enabled flag of a user's preference.
///
/// PUT /api/v1/notifications/preferences?userId=<uuid>&enabled=<bool>
pub async fn set_preference_enabled(
    State(state): State<AppState>,
    Query(query): Query<TogglePreferenceQuery>,
) -> Result<Json<PreferenceResponse>, ApiError> {
    let preference = preference_service(&state)
        .set_enabled(query.user_id, query.enabled)
        .await?;

    info!(
        user_id = %preference.user_id,
        enabled = preference.enabled,
        "Notification preference toggled"
    );

    Ok(Json(preference.into()))
}
