//! Notification dispatch and history endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use persistence::repositories::{NotificationRepository, PreferenceRepository};
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_notification_dispatched;
use domain::models::notification::{
    ListNotificationsResponse, MarkSeenResponse, NotificationQuery, NotificationResponse,
    SendNotificationRequest,
};
use domain::models::Notification;
use domain::services::{DispatchService, HistoryService, PreferenceService};

fn dispatch_service(state: &AppState) -> DispatchService {
    DispatchService::new(
        PreferenceService::new(Arc::new(PreferenceRepository::new(state.pool.clone()))),
        Arc::new(NotificationRepository::new(state.pool.clone())),
        state.mailer.clone(),
    )
}

fn history_service(state: &AppState) -> HistoryService {
    HistoryService::new(Arc::new(NotificationRepository::new(state.pool.clone())))
}

fn list_response(notifications: Vec<Notification>) -> ListNotificationsResponse {
    let notifications: Vec<NotificationResponse> =
        notifications.into_iter().map(Into::into).collect();
    let total = notifications.len();
    ListNotificationsResponse {
        notifications,
        total,
    }
}

/// Dispatch a notification to a user.
///
/// POST /api/v1/notifications
pub async fn send_notification(
    State(state): State<AppState>,
    Json(request): Json<SendNotificationRequest>,
) -> Result<(StatusCode, Json<NotificationResponse>), ApiError> {
    request.validate()?;

    let notification = dispatch_service(&state)
        .send(request.user_id, &request.subject, &request.body)
        .await?;

    record_notification_dispatched();
    info!(
        notification_id = %notification.id,
        user_id = %notification.user_id,
        "Notification dispatched"
    );

    Ok((StatusCode::CREATED, Json(notification.into())))
}

/// Fetch a user's full notification history, newest first.
///
/// GET /api/v1/notifications?userId=<uuid>
pub async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<NotificationQuery>,
) -> Result<Json<ListNotificationsResponse>, ApiError> {
    let notifications = history_service(&state).history(query.user_id).await?;
    Ok(Json(list_response(notifications)))
}

/// Fetch a user's unseen notifications, newest first.
///
/// GET /api/v1/notifications/unseen?userId=<uuid>
pub async fn get_unseen(
    State(state): State<AppState>,
    Query(query): Query<NotificationQuery>,
) -> Result<Json<ListNotificationsResponse>, ApiError> {
    let notifications = history_service(&state).unseen(query.user_id).await?;
    Ok(Json(list_response(notifications)))
}

/// Mark every unseen notification for a user as seen.
///
/// PUT /api/v1/notifications/seen?userId=<uuid>
pub async fn mark_all_seen(
    State(state): State<AppState>,
    Query(query): Query<NotificationQuery>,
) -> Result<Json<MarkSeenResponse>, ApiError> {
    let marked = history_service(&state).mark_all_seen(query.user_id).await?;

    info!(user_id = %query.user_id, marked = marked, "Notifications marked as seen");

    Ok(Json(MarkSeenResponse { marked }))
}
