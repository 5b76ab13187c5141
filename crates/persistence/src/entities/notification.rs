//! Notification entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the notifications table.
#[derive(Debug, Clone, FromRow)]
pub struct NotificationEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub subject: String,
    pub body: String,
    pub created_on: DateTime<Utc>,
    pub seen: bool,
}

impl From<NotificationEntity> for domain::models::Notification {
    fn from(entity: NotificationEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            subject: entity.subject,
            body: entity.body,
            created_on: entity.created_on,
            seen: entity.seen,
        }
    }
}
