//! Notification repository for database operations.

use async_trait::async_trait;
use domain::models::Notification;
use domain::services::NotificationStore;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::NotificationEntity;

/// Repository for notification database operations.
#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All notifications for a user, newest first.
    pub async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Notification>, sqlx::Error> {
        let entities = sqlx::query_as::<_, NotificationEntity>(
            r#"
            SELECT id, user_id, subject, body, created_on, seen
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_on DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Unseen notifications for a user, newest first.
    pub async fn find_unseen_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let entities = sqlx::query_as::<_, NotificationEntity>(
            r#"
            SELECT id, user_id, subject, body, created_on, seen
            FROM notifications
            WHERE user_id = $1 AND seen = FALSE
            ORDER BY created_on DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Insert a new notification record.
    pub async fn save(&self, notification: &Notification) -> Result<Notification, sqlx::Error> {
        let entity = sqlx::query_as::<_, NotificationEntity>(
            r#"
            INSERT INTO notifications (id, user_id, subject, body, created_on, seen)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, subject, body, created_on, seen
            "#,
        )
        .bind(notification.id)
        .bind(notification.user_id)
        .bind(&notification.subject)
        .bind(&notification.body)
        .bind(notification.created_on)
        .bind(notification.seen)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }

    /// Persist the seen flag for a batch of existing records.
    ///
    /// One UPDATE per record; the batch is not atomic as a whole.
    pub async fn save_all(&self, notifications: &[Notification]) -> Result<(), sqlx::Error> {
        for notification in notifications {
            sqlx::query(
                r#"
                UPDATE notifications
                SET seen = $2
                WHERE id = $1
                "#,
            )
            .bind(notification.id)
            .bind(notification.seen)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Notification>, sqlx::Error> {
        NotificationRepository::find_by_user_id(self, user_id).await
    }

    async fn find_unseen_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        NotificationRepository::find_unseen_by_user_id(self, user_id).await
    }

    async fn save(&self, notification: &Notification) -> Result<Notification, sqlx::Error> {
        NotificationRepository::save(self, notification).await
    }

    async fn save_all(&self, notifications: &[Notification]) -> Result<(), sqlx::Error> {
        NotificationRepository::save_all(self, notifications).await
    }
}
